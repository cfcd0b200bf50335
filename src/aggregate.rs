//! Terminal reductions: scalar aggregates, folds and quantifiers.
//!
//! Every method here forces evaluation of the whole chain through the
//! [`Runner`](crate::Runner) and returns the first error the chain raised.
//!
//! ```
//! use ironquery::*;
//!
//! let p = Pipeline::default();
//! let withdrawals = from_vec(&p, vec![20.0, 10.0, 40.0, 50.0, 10.0, 70.0, 30.0]);
//! let balance = withdrawals
//!     .fold_seeded(100.0, |balance: f64, w: &f64| {
//!         if balance - w >= 0.0 { balance - w } else { balance }
//!     })
//!     .unwrap();
//! assert_eq!(balance, 20.0);
//! ```

use crate::collection::{QBound, Query};
use crate::combiners::{Average, CombineFn, Count, Max, Min, Sum, Summable};
use crate::error::{QueryError, Result};
use num_traits::ToPrimitive;
use std::sync::Arc;

impl<T: QBound> Query<T> {
    /// Run `comb` over every element.
    pub fn combine<C, A, O>(&self, comb: C) -> Result<O>
    where
        C: CombineFn<T, A, O>,
    {
        self.runner().run(self, "combine", |stream| {
            let mut acc = comb.create();
            for item in stream {
                comb.add_input(&mut acc, item?)?;
            }
            comb.finish(acc)
        })
    }

    /// Number of elements; zero for an empty sequence.
    pub fn count(&self) -> Result<usize> {
        self.combine(Count)
    }

    pub fn count_where<P>(&self, pred: P) -> Result<usize>
    where
        P: Fn(&T) -> bool,
    {
        self.runner().run(self, "count_where", |stream| {
            let mut n = 0usize;
            for item in stream {
                if pred(&item?) {
                    n += 1;
                }
            }
            Ok(n)
        })
    }

    /// Checked sum starting at zero.
    ///
    /// # Errors
    /// [`QueryError::ArithmeticOverflow`] when the running total leaves the
    /// range of `T`.
    pub fn sum(&self) -> Result<T>
    where
        T: Summable,
    {
        self.combine(Sum::<T>::new())
    }

    pub fn sum_of<V, F>(&self, selector: F) -> Result<V>
    where
        V: Summable + Send + Sync + 'static,
        F: 'static + Send + Sync + Fn(&T) -> V,
    {
        self.combine(Sum::<V>::new().of(selector))
    }

    /// Smallest element.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] on an empty sequence.
    pub fn min(&self) -> Result<T>
    where
        T: Ord,
    {
        self.combine(Min::<T>::new())
    }

    /// Largest element.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] on an empty sequence.
    pub fn max(&self) -> Result<T>
    where
        T: Ord,
    {
        self.combine(Max::<T>::new())
    }

    pub fn min_of<V, F>(&self, selector: F) -> Result<V>
    where
        V: Ord + Send + Sync + 'static,
        F: 'static + Send + Sync + Fn(&T) -> V,
    {
        self.combine(Min::<V>::new().of(selector))
    }

    pub fn max_of<V, F>(&self, selector: F) -> Result<V>
    where
        V: Ord + Send + Sync + 'static,
        F: 'static + Send + Sync + Fn(&T) -> V,
    {
        self.combine(Max::<V>::new().of(selector))
    }

    /// Mean as `f64`.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] on an empty sequence.
    pub fn average(&self) -> Result<f64>
    where
        T: ToPrimitive,
    {
        self.combine(Average::<T>::new())
    }

    pub fn average_of<V, F>(&self, selector: F) -> Result<f64>
    where
        V: ToPrimitive + Send + Sync + 'static,
        F: 'static + Send + Sync + Fn(&T) -> V,
    {
        self.combine(Average::<V>::new().of(selector))
    }

    /// Fold seeded with the first element.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] on an empty sequence.
    pub fn fold<F>(&self, combine: F) -> Result<T>
    where
        F: Fn(T, &T) -> T,
    {
        self.runner().run(self, "fold", |mut stream| {
            let mut acc = match stream.next() {
                Some(first) => first?,
                None => return Err(QueryError::empty("fold")),
            };
            for item in stream {
                acc = combine(acc, &item?);
            }
            Ok(acc)
        })
    }

    /// Fold starting at `seed`. An empty sequence returns `seed` unchanged.
    ///
    /// Conditional acceptance is expressed by `combine` returning its
    /// accumulator unchanged.
    pub fn fold_seeded<A, F>(&self, seed: A, combine: F) -> Result<A>
    where
        F: Fn(A, &T) -> A,
    {
        self.runner().run(self, "fold_seeded", |stream| {
            let mut acc = seed;
            for item in stream {
                acc = combine(acc, &item?);
            }
            Ok(acc)
        })
    }

    // ---- quantifiers ----

    /// `true` as soon as one element matches. Stops pulling at the first match.
    pub fn any<P>(&self, pred: P) -> Result<bool>
    where
        P: Fn(&T) -> bool,
    {
        self.runner().run(self, "any", |stream| {
            for item in stream {
                if pred(&item?) {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    /// `true` when no element fails `pred`; vacuously `true` when empty.
    pub fn all<P>(&self, pred: P) -> Result<bool>
    where
        P: Fn(&T) -> bool,
    {
        self.runner().run(self, "all", |stream| {
            for item in stream {
                if !pred(&item?) {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    pub fn contains(&self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.any(|x| x == value)
    }

    /// Pairwise equality of two sequences, including their lengths.
    pub fn sequence_equal(&self, other: &Query<T>) -> Result<bool>
    where
        T: PartialEq,
    {
        let other = Arc::clone(&other.producer);
        self.runner().run(self, "sequence_equal", move |mut left| {
            let mut right = other();
            loop {
                match (left.next(), right.next()) {
                    (None, None) => return Ok(true),
                    (Some(a), Some(b)) => {
                        if a? != b? {
                            return Ok(false);
                        }
                    }
                    _ => return Ok(false),
                }
            }
        })
    }

    /// First element.
    ///
    /// # Errors
    /// [`QueryError::EmptySequence`] on an empty sequence.
    pub fn first(&self) -> Result<T> {
        self.runner().run(self, "first", |mut stream| {
            stream
                .next()
                .unwrap_or_else(|| Err(QueryError::empty("first")))
        })
    }
}
