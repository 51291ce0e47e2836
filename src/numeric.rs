//! Numeric reading of stored values, used to order entries by value.

/// A value that can be read as a floating-point number.
///
/// Returns `None` when the value has no numeric reading; strings are
/// parsed after trimming surrounding whitespace.
pub trait NumericValue {
    fn as_f64(&self) -> Option<f64>;
}

macro_rules! numeric_primitive {
    ($($t:ty),* $(,)?) => {
        $(
            impl NumericValue for $t {
                #[inline]
                fn as_f64(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

numeric_primitive!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl NumericValue for str {
    fn as_f64(&self) -> Option<f64> {
        self.trim().parse().ok()
    }
}

impl NumericValue for String {
    fn as_f64(&self) -> Option<f64> {
        self.as_str().as_f64()
    }
}

impl<T: NumericValue + ?Sized> NumericValue for &T {
    fn as_f64(&self) -> Option<f64> {
        (**self).as_f64()
    }
}
