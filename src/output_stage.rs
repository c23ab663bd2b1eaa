use crate::decompose::MultiplierShiftPair;
use crate::kernel;
use crate::range::QuantizedRange;
use serde::{Deserialize, Serialize};

/// Per-channel requantization parameters handed to integer kernels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputStageConfig {
    pub pairs: Vec<MultiplierShiftPair>,
    pub range: QuantizedRange,
    pub zero_point: i32,
}

impl OutputStageConfig {
    pub fn new(pairs: Vec<MultiplierShiftPair>, zero_point: i32) -> Self {
        Self { pairs, range: QuantizedRange::UNBOUNDED, zero_point }
    }

    pub fn with_range(mut self, range: QuantizedRange) -> Self {
        self.range = range;
        self
    }

    pub fn len(&self) -> usize { self.pairs.len() }
    pub fn is_empty(&self) -> bool { self.pairs.is_empty() }

    pub fn multipliers(&self) -> Vec<i32> { self.pairs.iter().map(|p| p.multiplier).collect() }
    pub fn shifts(&self) -> Vec<i32> { self.pairs.iter().map(|p| p.shift).collect() }

    /// Integer-only requantization of an accumulator belonging to `channel`.
    pub fn requantize(&self, channel: usize, acc: i32) -> Option<i32> {
        self.pairs.get(channel).map(|&pair| kernel::requantize(acc, pair, self.zero_point, self.range))
    }

    /// Requantizes a row-major `[rows, channels]` block of accumulators in place.
    pub fn requantize_rows(&self, acc: &mut [i32]) {
        let n = self.pairs.len();
        if n == 0 { return; }
        for row in acc.chunks_mut(n) {
            for (v, &pair) in row.iter_mut().zip(&self.pairs) {
                *v = kernel::requantize(*v, pair, self.zero_point, self.range);
            }
        }
    }
}
