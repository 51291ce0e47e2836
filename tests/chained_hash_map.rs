// ChainedHashMap scenario suite.
//
// Each test documents the behavior being verified. Expected traces for the
// bucket counts come from running the same key sets through the two
// reference hash strategies:
// - CodeSum: sum of character codes.
// - PositionWeighted: character code times 1-based position, summed.
// Run with RUST_LOG=debug to see resize/clear logging.
use chained_hashmap::{ChainedHashMap, CodeSum, MapError, PositionWeighted};
use test_log::test;

fn assert_load(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "table_load {} != {}",
        actual,
        expected
    );
}

// Test: empty_buckets and len across inserts and an overwrite.
// Verifies: an overwrite neither changes len nor occupies another bucket.
#[test]
fn empty_buckets_small_trace() {
    let mut m = ChainedHashMap::with_hash_fn(100, CodeSum).unwrap();
    assert_eq!((m.empty_buckets(), m.len(), m.capacity()), (100, 0, 100));
    m.put("key1", 10);
    assert_eq!((m.empty_buckets(), m.len(), m.capacity()), (99, 1, 100));
    m.put("key2", 20);
    assert_eq!((m.empty_buckets(), m.len(), m.capacity()), (98, 2, 100));
    m.put("key1", 30);
    assert_eq!((m.empty_buckets(), m.len(), m.capacity()), (98, 2, 100));
    assert_eq!(m.get("key1"), Some(&30));
    m.put("key4", 40);
    assert_eq!((m.empty_buckets(), m.len(), m.capacity()), (97, 3, 100));
}

// Test: empty bucket count falls toward a floor as 150 keys fill 50 buckets.
#[test]
fn empty_buckets_decrease_toward_floor() {
    let mut m = ChainedHashMap::with_capacity(50).unwrap();
    let mut trace = Vec::new();
    for i in 0..150 {
        m.put(format!("key{}", i), i * 100);
        if i % 30 == 0 {
            trace.push((m.empty_buckets(), m.len()));
        }
    }
    assert_eq!(trace, [(49, 1), (39, 31), (36, 61), (33, 91), (30, 121)]);
}

// Test: put with CodeSum; load grows linearly while empties plateau.
#[test]
fn put_trace_code_sum() {
    let mut m = ChainedHashMap::with_capacity(50).unwrap();
    let mut trace = Vec::new();
    for i in 0..150 {
        m.put(format!("str{}", i), i * 100);
        if i % 25 == 24 {
            trace.push((m.empty_buckets(), m.table_load(), m.len()));
        }
    }
    let expected = [
        (39, 0.5, 25),
        (37, 1.0, 50),
        (35, 1.5, 75),
        (32, 2.0, 100),
        (30, 2.5, 125),
        (30, 3.0, 150),
    ];
    assert_eq!(trace.len(), expected.len());
    for ((empty, load, len), (e_empty, e_load, e_len)) in trace.into_iter().zip(expected) {
        assert_eq!((empty, len), (e_empty, e_len));
        assert_load(load, e_load);
    }
}

// Test: put with PositionWeighted where every key is written three times.
// Verifies: repeated puts count once.
#[test]
fn put_trace_position_weighted_with_repeats() {
    let mut m = ChainedHashMap::with_hash_fn(40, PositionWeighted).unwrap();
    let mut trace = Vec::new();
    for i in 0..50 {
        m.put(format!("str{}", i / 3), i * 100);
        if i % 10 == 9 {
            trace.push((m.empty_buckets(), m.table_load(), m.len()));
        }
    }
    let expected = [
        (36, 0.1, 4),
        (33, 0.175, 7),
        (30, 0.25, 10),
        (27, 0.35, 14),
        (25, 0.425, 17),
    ];
    for ((empty, load, len), (e_empty, e_load, e_len)) in trace.into_iter().zip(expected) {
        assert_eq!((empty, len), (e_empty, e_len));
        assert_load(load, e_load);
    }
    assert_eq!(m.capacity(), 40);
}

// Test: table_load on an empty map and after two distinct keys.
#[test]
fn table_load_small() {
    let mut m = ChainedHashMap::with_capacity(100).unwrap();
    assert_eq!(m.table_load(), 0.0);
    m.put("key1", 10);
    assert_load(m.table_load(), 0.01);
    m.put("key2", 20);
    assert_load(m.table_load(), 0.02);
    m.put("key1", 30);
    assert_load(m.table_load(), 0.02);
}

#[test]
fn table_load_trace() {
    let mut m = ChainedHashMap::with_capacity(50).unwrap();
    for i in 0..50 {
        m.put(format!("key{}", i), i * 100);
        if i % 10 == 0 {
            assert_load(m.table_load(), (i + 1) as f64 / 50.0);
            assert_eq!(m.len(), i as usize + 1);
        }
    }
}

// Test: clear resets len and keeps capacity.
#[test]
fn clear_keeps_capacity() {
    let mut m = ChainedHashMap::with_capacity(100).unwrap();
    assert_eq!((m.len(), m.capacity()), (0, 100));
    m.put("key1", 10);
    m.put("key2", 20);
    m.put("key1", 30);
    assert_eq!((m.len(), m.capacity()), (2, 100));
    m.clear();
    assert_eq!((m.len(), m.capacity()), (0, 100));
    assert_eq!(m.empty_buckets(), 100);
    assert!(m.get("key1").is_none());
}

// Test: resize changes only capacity; a later clear keeps the new capacity.
#[test]
fn clear_after_resize() {
    let mut m = ChainedHashMap::with_capacity(50).unwrap();
    assert_eq!((m.len(), m.capacity()), (0, 50));
    m.put("key1", 10);
    assert_eq!((m.len(), m.capacity()), (1, 50));
    m.put("key2", 20);
    assert_eq!((m.len(), m.capacity()), (2, 50));
    m.resize_table(100).unwrap();
    assert_eq!((m.len(), m.capacity()), (2, 100));
    m.clear();
    assert_eq!((m.len(), m.capacity()), (0, 100));
    m.resize_table(10).unwrap();
    assert_eq!((m.len(), m.capacity()), (0, 10));
}

#[test]
fn contains_key_small() {
    let mut m = ChainedHashMap::with_capacity(50).unwrap();
    assert!(!m.contains_key("key1"));
    m.put("key1", 10);
    m.put("key2", 20);
    m.put("key3", 30);
    assert!(m.contains_key("key1"));
    assert!(!m.contains_key("key4"));
    assert!(m.contains_key("key2"));
    assert!(m.contains_key("key3"));
    m.remove("key3");
    assert!(!m.contains_key("key3"));
}

// Test: inserted keys are present and their neighbors are absent.
#[test]
fn contains_key_many() {
    let mut m = ChainedHashMap::with_hash_fn(75, PositionWeighted).unwrap();
    let keys: Vec<u32> = (1..1000).step_by(20).collect();
    for &k in &keys {
        m.put(k.to_string(), k * 42);
    }
    assert_eq!((m.len(), m.capacity()), (50, 75));
    for &k in &keys {
        assert!(m.contains_key(&k.to_string()));
        assert!(!m.contains_key(&(k + 1).to_string()));
    }
}

#[test]
fn get_small() {
    let mut m = ChainedHashMap::with_capacity(30).unwrap();
    assert_eq!(m.get("key"), None);
    m.put("key1", 10);
    assert_eq!(m.get("key1"), Some(&10));
}

#[test]
fn get_hits_and_misses() {
    let mut m = ChainedHashMap::with_hash_fn(150, PositionWeighted).unwrap();
    for i in (200..300).step_by(7) {
        m.put(i.to_string(), i * 10);
    }
    assert_eq!((m.len(), m.capacity()), (15, 150));
    for i in (200..300).step_by(21) {
        assert_eq!(m.get(&i.to_string()), Some(&(i * 10)));
        assert_eq!(m.get(&(i + 1).to_string()), None);
    }
}

// Test: removing an absent key is a no-op and does not disturb len.
#[test]
fn remove_absent_key_is_noop() {
    let mut m = ChainedHashMap::with_capacity(10).unwrap();
    m.put("a", 1);
    assert_eq!(m.remove("nope"), None);
    assert_eq!(m.len(), 1);
    assert_eq!(m.remove("a"), Some(1));
    assert_eq!(m.remove("a"), None);
    assert_eq!(m.len(), 0);
}

// Test: growth and shrink both keep every entry reachable with its value.
#[test]
fn resize_grow_and_shrink_keep_entries() {
    let mut m = ChainedHashMap::with_hash_fn(20, PositionWeighted).unwrap();
    for i in 0..100 {
        m.put(format!("k{}", i), i);
    }
    for cap in [200, 3, 1, 57] {
        m.resize_table(cap).unwrap();
        assert_eq!(m.capacity(), cap);
        assert_eq!(m.len(), 100);
        assert_load(m.table_load(), 100.0 / cap as f64);
        for i in 0..100 {
            assert_eq!(m.get(&format!("k{}", i)), Some(&i));
        }
    }
    m.resize_table(1).unwrap();
    assert_eq!(m.empty_buckets(), 0);
}

#[test]
fn invalid_capacity_fails_fast() {
    assert_eq!(
        ChainedHashMap::<i32>::with_capacity(0).err(),
        Some(MapError::InvalidCapacity { requested: 0 })
    );
    let mut m: ChainedHashMap<i32> = ChainedHashMap::with_capacity(5).unwrap();
    assert!(m.resize_table(0).is_err());
    assert_eq!(m.capacity(), 5);
}

// Test: pairs ordered by numeric value, largest first, across mixed buckets.
#[test]
fn sorted_pairs_by_value() {
    let mut m = ChainedHashMap::with_capacity(7).unwrap();
    m.extend([("apple", 3), ("pear", 10), ("fig", -4), ("kiwi", 7)]);
    let sorted: Vec<(&str, i32)> = m
        .sorted_pairs()
        .unwrap()
        .into_iter()
        .map(|(k, v)| (k, *v))
        .collect();
    assert_eq!(sorted, [("pear", 10), ("kiwi", 7), ("apple", 3), ("fig", -4)]);
}

#[test]
fn display_lists_each_bucket() {
    let mut m = ChainedHashMap::with_capacity(3).unwrap();
    m.put("a", 1); // 97 % 3 == 1
    let dump = m.to_string();
    assert_eq!(dump, "0: []\n1: [(a, 1)]\n2: []\n");
}
