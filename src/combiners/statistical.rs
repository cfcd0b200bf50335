//! Statistical combiners: `Average`

use super::{CombineFn, Of};
use crate::error::{QueryError, Result};
use num_traits::ToPrimitive;
use std::marker::PhantomData;

/* ===================== Average<T> ===================== */

/// Arithmetic mean as `f64`.
///
/// Values are converted with [`ToPrimitive::to_f64`]. Unlike a sum, an
/// average of nothing is undefined, so empty input fails with
/// [`QueryError::EmptySequence`].
///
/// - Accumulator: `(sum_f64, count)`
/// - Output: `f64`
#[derive(Clone, Copy, Debug, Default)]
pub struct Average<T>(pub PhantomData<T>);
impl<T> Average<T> {
    /// Convenience constructor (same as `Default`).
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Average of `selector(element)`.
    pub fn of<I, F>(self, selector: F) -> Of<Self, F>
    where
        F: Fn(&I) -> T,
    {
        Of::new(self, selector)
    }
}

impl<T> CombineFn<T, (f64, usize), f64> for Average<T>
where
    T: ToPrimitive + Send + Sync + 'static,
{
    fn create(&self) -> (f64, usize) {
        (0.0, 0)
    }

    fn add_input(&self, acc: &mut (f64, usize), v: T) -> Result<()> {
        let x = v
            .to_f64()
            .ok_or_else(|| QueryError::invalid_argument("average input is not representable as f64"))?;
        acc.0 += x;
        acc.1 += 1;
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(&self, acc: (f64, usize)) -> Result<f64> {
        if acc.1 == 0 {
            return Err(QueryError::empty("average"));
        }
        Ok(acc.0 / acc.1 as f64)
    }
}
