use crate::UrlKeywordPair;

/// Upper bound on items requested in one generation call.
pub const BATCH_SIZE: u32 = 10;

pub fn batch_count(total_count: u32, batch_size: u32) -> u32 {
    total_count.div_ceil(batch_size.max(1))
}

/// Sizes of each batch for one pair, e.g. `25 -> [10, 10, 5]`.
pub fn batch_sizes(total_count: u32, batch_size: u32) -> Vec<u32> {
    let batch_size = batch_size.max(1);
    (0..batch_count(total_count, batch_size))
        .map(|index| batch_size.min(total_count - index * batch_size))
        .collect()
}

/// Progress of an in-flight run, scoped to the pair being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProgress {
    /// 1-based.
    pub current_pair_index: usize,
    pub total_pairs: usize,
    pub current_keyword: String,
    pub completed: u32,
    pub total: u32,
}

impl RunProgress {
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.completed)
    }
}

/// One request the scheduler wants issued next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchIntent {
    pub pair_index: usize,
    pub batch_index: u32,
    pub pair: UrlKeywordPair,
    pub batch_size: u32,
    total_pairs: usize,
    total_count: u32,
    step: u32,
}

impl BatchIntent {
    pub fn progress_before(&self) -> RunProgress {
        self.progress(self.batch_index.saturating_mul(self.step))
    }

    pub fn progress_after(&self) -> RunProgress {
        self.progress(
            (self.batch_index + 1)
                .saturating_mul(self.step)
                .min(self.total_count),
        )
    }

    fn progress(&self, completed: u32) -> RunProgress {
        RunProgress {
            current_pair_index: self.pair_index + 1,
            total_pairs: self.total_pairs,
            current_keyword: self.pair.keyword.clone(),
            completed,
            total: self.total_count,
        }
    }
}

/// Walks (pair index, batch index) in order, yielding one intent at a time.
///
/// Every pair gets the same `total_count`. A total of zero yields nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pairs: Vec<UrlKeywordPair>,
    total_count: u32,
    batch_size: u32,
    pair_index: usize,
    batch_index: u32,
}

impl BatchPlan {
    pub fn new(pairs: Vec<UrlKeywordPair>, total_count: u32) -> Self {
        Self::with_batch_size(pairs, total_count, BATCH_SIZE)
    }

    pub fn with_batch_size(pairs: Vec<UrlKeywordPair>, total_count: u32, batch_size: u32) -> Self {
        Self {
            pairs,
            total_count,
            batch_size: batch_size.max(1),
            pair_index: 0,
            batch_index: 0,
        }
    }
}

impl Iterator for BatchPlan {
    type Item = BatchIntent;

    fn next(&mut self) -> Option<BatchIntent> {
        let batches = batch_count(self.total_count, self.batch_size);
        while let Some(pair) = self.pairs.get(self.pair_index) {
            if self.batch_index < batches {
                let batch_index = self.batch_index;
                self.batch_index += 1;
                return Some(BatchIntent {
                    pair_index: self.pair_index,
                    batch_index,
                    pair: pair.clone(),
                    batch_size: self
                        .batch_size
                        .min(self.total_count - batch_index * self.batch_size),
                    total_pairs: self.pairs.len(),
                    total_count: self.total_count,
                    step: self.batch_size,
                });
            }
            self.pair_index += 1;
            self.batch_index = 0;
        }
        None
    }
}
