#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maps every item, in parallel when the `parallel` feature is enabled, and
/// returns the results in input order.
///
/// Reductions over the returned vector are therefore independent of thread
/// scheduling, which keeps floating-point sums reproducible run to run.
pub(crate) fn map_ordered<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    #[cfg(not(feature = "parallel"))]
    let iterator = items.iter();

    #[cfg(feature = "parallel")]
    let iterator = items.par_iter();

    iterator.map(f).collect()
}
