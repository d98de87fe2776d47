use crate::config::BitWidths;

/// Level bookkeeping: `step` counts completed BFS levels and `cur_count` is
/// how many frontier entries of the level being drained are still queued.
/// Both are fixed-width and wrap at the result width.
#[derive(Clone, Debug)]
pub struct LevelTracker {
    step: u64,
    cur_count: u64,
    iter: usize,
    mask: u64,
}

impl LevelTracker {
    pub fn new(widths: &BitWidths) -> Self {
        Self {
            step: 0,
            cur_count: 0,
            iter: 0,
            mask: widths.result_mask(),
        }
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn cur_count(&self) -> u64 {
        self.cur_count
    }

    /// Row offset where the head's scan resumes this cycle.
    pub fn iter(&self) -> usize {
        self.iter
    }

    /// Hop count of a neighbor discovered this cycle. When `cur_count` is zero
    /// the head opens a new level whose `step` increment only lands at the
    /// clock edge, so the discovery is already one level further.
    pub fn current_level(&self) -> u64 {
        if self.cur_count == 0 {
            (self.step + 1) & self.mask
        } else {
            self.step
        }
    }

    /// Clock edge for a cycle in which the frontier was non-empty.
    pub fn advance(&mut self, occupancy: usize, retired: bool, temp_iter: usize) {
        if self.cur_count == 0 {
            self.cur_count = occupancy as u64 & self.mask;
            self.step = (self.step + 1) & self.mask;
        }
        if retired {
            self.iter = 0;
            debug_assert!(self.cur_count > 0, "level count underflow");
            self.cur_count = self.cur_count.saturating_sub(1);
        } else {
            self.iter = temp_iter;
        }
    }

    /// Zeroes the level counters for a fresh query; the scan offset is already
    /// zero whenever the frontier is empty.
    pub fn begin_query(&mut self) {
        self.step = 0;
        self.cur_count = 0;
    }

    pub fn reset(&mut self) {
        self.step = 0;
        self.cur_count = 0;
        self.iter = 0;
    }
}
