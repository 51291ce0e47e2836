#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can walk
// the bucket array and arena directly.

use crate::chained_hash_map::{ChainedHashMap, Handle};
use crate::hash_fn::{CodeSum, KeyHash, PositionWeighted};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Resize(usize),
    Rehash,
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z0-9]{0,5}", 1..=10).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z0-9]{0,5}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => (1usize..40).prop_map(OpI::Resize),
            1 => Just(OpI::Rehash),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Bucket-level invariants that the public API cannot observe.
fn check_structure<V, H: KeyHash>(m: &ChainedHashMap<V, H>) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    let mut total = 0usize;
    for (i, chain) in m.buckets.iter().enumerate() {
        let walked = chain.iter(&m.slots).count();
        prop_assert_eq!(walked, chain.len(), "chain length drifted");
        total += walked;
        for (_, e) in chain.iter(&m.slots) {
            prop_assert_eq!(m.bucket_index(&e.key), i, "key outside its home bucket");
            prop_assert!(seen.insert(e.key.clone()), "duplicate key");
        }
    }
    prop_assert_eq!(total, m.len());
    prop_assert_eq!(m.slots.len(), m.len());
    Ok(())
}

fn run_state_machine<H: KeyHash>(
    mut sut: ChainedHashMap<i32, H>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut live: HashMap<String, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = pool[i].clone();
                let prev = sut.put(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                let h = sut.find(&k).expect("present after put");
                if let Some(&old) = live.get(&k) {
                    prop_assert_eq!(h, old, "update must keep the same entry");
                }
                live.insert(k, h);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                if let Some(h) = live.remove(k) {
                    stale.push(h);
                }
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
                prop_assert_eq!(sut.find(k).is_some(), model.contains_key(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(&h) = live.get(k) {
                    let vr = h.value_mut(&mut sut).expect("live handle should resolve");
                    *vr = vr.wrapping_add(d);
                    if let Some(mv) = model.get_mut(k) {
                        *mv = mv.wrapping_add(d);
                    }
                }
            }
            OpI::Resize(c) => {
                sut.resize_table(c).expect("positive capacity");
                prop_assert_eq!(sut.capacity(), c);
            }
            OpI::Rehash => sut.rehash(),
            OpI::Clear => {
                let cap = sut.capacity();
                sut.clear();
                prop_assert_eq!(sut.capacity(), cap);
                model.clear();
                stale.extend(live.drain().map(|(_, h)| h));
            }
            OpI::Iterate => {
                let s: BTreeMap<String, i32> =
                    sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                let m: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s, m);
            }
        }

        for &h in &stale {
            prop_assert!(h.value(&sut).is_none(), "stale handle resolved");
        }
        for (k, &h) in &live {
            prop_assert_eq!(h.key(&sut), Some(k.as_str()));
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!((sut.table_load() - model.len() as f64 / sut.capacity() as f64).abs() < 1e-12);
        check_structure(&sut)?;
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap under
// each reference strategy, with resizes, rehashes and clears interleaved.
// Invariants exercised after every op:
// - get/contains/remove parity with the model; put returns the prior value.
// - len equals sum of chain lengths; each key lives in its home bucket once.
// - Handles stay valid across resize/rehash and never resolve once removed.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_code_sum((pool, ops) in arb_scenario(), cap in 1usize..20) {
        let sut = ChainedHashMap::with_hash_fn(cap, CodeSum).unwrap();
        run_state_machine(sut, pool, ops)?;
    }

    #[test]
    fn prop_state_machine_position_weighted((pool, ops) in arb_scenario(), cap in 1usize..20) {
        let sut = ChainedHashMap::with_hash_fn(cap, PositionWeighted).unwrap();
        run_state_machine(sut, pool, ops)?;
    }
}

// Property: same invariants under worst-case collisions (every key hashes to
// one bucket), which stresses head/middle/tail unlinking in a single chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), cap in 1usize..20) {
        let sut = ChainedHashMap::with_hash_fn(cap, |_: &str| 0u64).unwrap();
        run_state_machine(sut, pool, ops)?;
    }
}
