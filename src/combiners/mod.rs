//! Built-in combiners for [`Query::combine`](crate::Query::combine) and
//! [`Query::combine_groups`](crate::Query::combine_groups).
//!
//! A combiner folds a sequence of values into an accumulator (`A`) and turns
//! the accumulator into an output (`O`):
//!
//! - [`Count`] -- number of values.
//! - [`Sum<T>`] -- checked sum starting at zero.
//! - [`Min<T>`] / [`Max<T>`] -- extremes under `Ord`; fail on empty input.
//! - [`Average<T>`] -- mean as `f64`; fails on empty input.
//!
//! Use `.of(selector)` on any combiner to feed it a projection of each element
//! instead of the element itself.
//!
//! # Examples
//! ```
//! use ironquery::*;
//!
//! let p = Pipeline::default();
//! let words = from_vec(&p, vec!["cherry".to_string(), "apple".to_string(), "blueberry".to_string()]);
//!
//! let total = words.combine(Sum::<usize>::new().of(|w: &String| w.len())).unwrap();
//! assert_eq!(total, 20);
//!
//! let shortest = words.combine(Min::<usize>::new().of(|w: &String| w.len())).unwrap();
//! assert_eq!(shortest, 5);
//! ```

use crate::error::Result;

mod basic;
mod statistical;

pub use basic::{Max, Min, Sum, Summable};
pub use statistical::Average;

/// Accumulation strategy for a sequence of `V` values.
pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V) -> Result<()>;
    fn finish(&self, acc: A) -> Result<O>;
}

/* ===================== Count ===================== */

/// Number of values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl<V> CombineFn<V, usize, usize> for Count {
    fn create(&self) -> usize {
        0
    }

    fn add_input(&self, acc: &mut usize, _v: V) -> Result<()> {
        *acc += 1;
        Ok(())
    }

    fn finish(&self, acc: usize) -> Result<usize> {
        Ok(acc)
    }
}

/* ===================== Of ===================== */

/// A combiner fed with `selector(element)` instead of the element.
///
/// Built with the `of` method available on every built-in combiner.
#[derive(Clone, Copy, Debug)]
pub struct Of<C, F> {
    inner: C,
    selector: F,
}

impl<C, F> Of<C, F> {
    pub fn new(inner: C, selector: F) -> Self {
        Self { inner, selector }
    }
}

impl<T, V, A, O, C, F> CombineFn<T, A, O> for Of<C, F>
where
    C: CombineFn<V, A, O>,
    F: Fn(&T) -> V + Send + Sync + 'static,
{
    fn create(&self) -> A {
        self.inner.create()
    }

    fn add_input(&self, acc: &mut A, v: T) -> Result<()> {
        self.inner.add_input(acc, (self.selector)(&v))
    }

    fn finish(&self, acc: A) -> Result<O> {
        self.inner.finish(acc)
    }
}
