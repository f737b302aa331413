//! Result limiting over a path search

use super::path::PathCandidate;
use crate::graph::CostPathResult;
use tracing::debug;

/// Pulls at most `max_results` paths from a search, then stops pulling.
///
/// Because the search is lazy, stopping here means no further expansion work
/// is done. Errors from the search pass through and end the sequence.
pub struct ResultLimiter<I> {
    inner: I,
    remaining: usize,
    max_depth: usize,
}

impl<'g, I> ResultLimiter<I>
where
    I: Iterator<Item = CostPathResult<PathCandidate<'g>>>,
{
    pub fn new(inner: I, max_results: usize, max_depth: usize) -> Self {
        Self {
            inner,
            remaining: max_results,
            max_depth,
        }
    }

    /// Drain the limited sequence, failing on the first search error
    pub fn collect_paths(self) -> CostPathResult<Vec<PathCandidate<'g>>> {
        self.collect()
    }
}

impl<'g, I> Iterator for ResultLimiter<I>
where
    I: Iterator<Item = CostPathResult<PathCandidate<'g>>>,
{
    type Item = CostPathResult<PathCandidate<'g>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match self.inner.next() {
            Some(Ok(path)) => {
                debug_assert!(
                    path.hops() <= self.max_depth,
                    "path of {} hops exceeds max depth {}",
                    path.hops(),
                    self.max_depth
                );
                self.remaining -= 1;
                if self.remaining == 0 {
                    debug!("result limit reached");
                }
                Some(Ok(path))
            }
            Some(Err(e)) => {
                self.remaining = 0;
                Some(Err(e))
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CostPathError, Node};
    use std::cell::Cell;

    fn trivial(node: &Node, cost: f64) -> PathCandidate<'_> {
        PathCandidate {
            nodes: vec![node],
            relationships: Vec::new(),
            cost,
        }
    }

    #[test]
    fn test_stops_pulling_at_limit() {
        let node = Node::with_id("a");
        let pulls = Cell::new(0);
        let source = (0..10).map(|i| {
            pulls.set(pulls.get() + 1);
            Ok(trivial(&node, i as f64))
        });

        let paths = ResultLimiter::new(source, 3, 1).collect_paths().unwrap();
        assert_eq!(paths.len(), 3);
        assert_eq!(pulls.get(), 3);
    }

    #[test]
    fn test_fewer_paths_than_limit() {
        let node = Node::with_id("a");
        let source = std::iter::once(Ok(trivial(&node, 0.0)));
        let paths = ResultLimiter::new(source, 5, 1).collect_paths().unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_error_ends_sequence() {
        let node = Node::with_id("a");
        let source = vec![
            Ok(trivial(&node, 0.0)),
            Err(CostPathError::FrontierExhausted { limit: 2 }),
            Ok(trivial(&node, 1.0)),
        ]
        .into_iter();

        let mut limiter = ResultLimiter::new(source, 10, 1);
        assert!(limiter.next().unwrap().is_ok());
        assert!(limiter.next().unwrap().is_err());
        assert!(limiter.next().is_none());
    }

    #[test]
    fn test_collect_paths_surfaces_error() {
        let node = Node::with_id("a");
        let source = vec![
            Ok(trivial(&node, 0.0)),
            Err(CostPathError::FrontierExhausted { limit: 2 }),
        ]
        .into_iter();
        let err = ResultLimiter::new(source, 10, 1).collect_paths().unwrap_err();
        assert!(matches!(err, CostPathError::FrontierExhausted { .. }));
    }
}
