//! Index sampling utilities used by the graph generators

use rand::Rng;
use std::collections::BTreeSet;

/// Uniform choice of an index in `0..length`, optionally skipping some.
#[derive(Debug)]
pub struct RandomIndexChoice<R> {
    rng: R,
}

impl<R: Rng> RandomIndexChoice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Uniform index in `0..length`; `None` for an empty range
    pub fn index(&mut self, length: usize) -> Option<usize> {
        (length > 0).then(|| self.rng.gen_range(0..length))
    }

    /// Uniform index in `0..length` that is not in `omit`.
    ///
    /// Draws once from the remaining indices and shifts the draw past each
    /// omitted index at or below it, so it terminates even when nearly
    /// every index is omitted. `None` when nothing is left to pick.
    pub fn index_omitting(&mut self, length: usize, omit: &BTreeSet<usize>) -> Option<usize> {
        let omitted = omit.range(..length).count();
        let available = length - omitted;
        if available == 0 {
            return None;
        }

        let choice = self.rng.gen_range(0..available);
        let mut offset = 0;
        for &skipped in omit.range(..length) {
            if choice + offset >= skipped {
                offset += 1;
            } else {
                break;
            }
        }
        Some(choice + offset)
    }

    /// Uniform index in `0..length` other than `omit`
    pub fn index_except(&mut self, length: usize, omit: usize) -> Option<usize> {
        self.index_omitting(length, &BTreeSet::from([omit]))
    }
}

/// Weighted choice of an index, by the A-Res reservoir method: each candidate
/// draws `u` uniformly and gets key `u^(1/w)`; the largest key wins.
#[derive(Debug)]
pub struct WeightedReservoirSampler<R> {
    rng: R,
}

impl<R: Rng> WeightedReservoirSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Index chosen with probability proportional to its weight.
    /// Zero weights are never chosen; `None` if every weight is zero.
    pub fn choose(&mut self, weights: &[u64]) -> Option<usize> {
        self.choose_omitting(weights, &BTreeSet::new())
    }

    /// Like `choose`, skipping the indices in `omit`
    pub fn choose_omitting(&mut self, weights: &[u64], omit: &BTreeSet<usize>) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for (index, &weight) in weights.iter().enumerate() {
            if weight == 0 || omit.contains(&index) {
                continue;
            }
            let u: f64 = self.rng.gen();
            let key = u.powf(1.0 / weight as f64);
            if best.map_or(true, |(_, max_key)| key > max_key) {
                best = Some((index, key));
            }
        }

        best.map(|(index, _)| index)
    }
}
