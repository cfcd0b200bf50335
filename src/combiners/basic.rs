//! Basic arithmetic combiners: Sum, Min, Max

use super::{CombineFn, Of};
use crate::error::{QueryError, Result};
use num_traits::{CheckedAdd, Zero};
use ordered_float::OrderedFloat;
use std::cmp::Ord;
use std::marker::PhantomData;

/* ===================== Summable ===================== */

/// Numeric types with a zero and an overflow-aware addition.
///
/// Integers report overflow through `checked_add`. Floats report overflow when
/// two finite operands produce an infinite sum.
pub trait Summable: Sized {
    fn zero() -> Self;
    fn checked_plus(self, rhs: Self) -> Option<Self>;
}

macro_rules! summable_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Summable for $t {
                fn zero() -> Self {
                    <$t as Zero>::zero()
                }

                fn checked_plus(self, rhs: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &rhs)
                }
            }
        )*
    };
}

macro_rules! summable_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Summable for $t {
                fn zero() -> Self {
                    0.0
                }

                fn checked_plus(self, rhs: Self) -> Option<Self> {
                    let sum = self + rhs;
                    if sum.is_infinite() && self.is_finite() && rhs.is_finite() {
                        None
                    } else {
                        Some(sum)
                    }
                }
            }

            impl Summable for OrderedFloat<$t> {
                fn zero() -> Self {
                    OrderedFloat(0.0)
                }

                fn checked_plus(self, rhs: Self) -> Option<Self> {
                    self.0.checked_plus(rhs.0).map(OrderedFloat)
                }
            }
        )*
    };
}

summable_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
summable_float!(f32, f64);

/* ===================== Sum<T> ===================== */

/// Sum of values, starting at zero. Empty input sums to zero.
///
/// - Accumulator: `T`
/// - Output: `T`
#[derive(Clone, Copy, Debug, Default)]
pub struct Sum<T>(pub PhantomData<T>);
impl<T> Sum<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Sum `selector(element)` instead of the element.
    pub fn of<I, F>(self, selector: F) -> Of<Self, F>
    where
        F: Fn(&I) -> T,
    {
        Of::new(self, selector)
    }
}

impl<T> CombineFn<T, T, T> for Sum<T>
where
    T: Summable + Send + Sync + 'static,
{
    fn create(&self) -> T {
        T::zero()
    }

    fn add_input(&self, acc: &mut T, v: T) -> Result<()> {
        let cur = std::mem::replace(acc, T::zero());
        *acc = cur.checked_plus(v).ok_or(QueryError::overflow("sum"))?;
        Ok(())
    }

    fn finish(&self, acc: T) -> Result<T> {
        Ok(acc)
    }
}

/* ===================== Min<T> ===================== */

/// Minimum value (requires `Ord`). Fails on empty input.
///
/// - Accumulator: `Option<T>`
/// - Output: `T`
#[derive(Clone, Copy, Debug, Default)]
pub struct Min<T>(pub PhantomData<T>);
impl<T> Min<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Minimum of `selector(element)`.
    pub fn of<I, F>(self, selector: F) -> Of<Self, F>
    where
        F: Fn(&I) -> T,
    {
        Of::new(self, selector)
    }
}

impl<T> CombineFn<T, Option<T>, T> for Min<T>
where
    T: Ord + Send + Sync + 'static,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) -> Result<()> {
        match acc {
            Some(cur) => {
                if v < *cur {
                    *cur = v
                }
            }
            None => *acc = Some(v),
        }
        Ok(())
    }

    fn finish(&self, acc: Option<T>) -> Result<T> {
        acc.ok_or(QueryError::empty("min"))
    }
}

/* ===================== Max<T> ===================== */

/// Maximum value (requires `Ord`). Fails on empty input.
///
/// - Accumulator: `Option<T>`
/// - Output: `T`
#[derive(Clone, Copy, Debug, Default)]
pub struct Max<T>(pub PhantomData<T>);
impl<T> Max<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Maximum of `selector(element)`.
    pub fn of<I, F>(self, selector: F) -> Of<Self, F>
    where
        F: Fn(&I) -> T,
    {
        Of::new(self, selector)
    }
}

impl<T> CombineFn<T, Option<T>, T> for Max<T>
where
    T: Ord + Send + Sync + 'static,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) -> Result<()> {
        match acc {
            Some(cur) => {
                if v > *cur {
                    *cur = v
                }
            }
            None => *acc = Some(v),
        }
        Ok(())
    }

    fn finish(&self, acc: Option<T>) -> Result<T> {
        acc.ok_or(QueryError::empty("max"))
    }
}
