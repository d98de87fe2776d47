use std::collections::VecDeque;

use crate::errors::EngineError;

/// Bounded FIFO frontier with two-phase update: reads during a cycle see the
/// committed contents, and the cycle's enqueue/dequeue land together in
/// [`FrontierQueue::commit`].
#[derive(Clone, Debug)]
pub struct FrontierQueue {
    capacity: usize,
    entries: VecDeque<usize>,
}

impl FrontierQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn peek(&self) -> Option<usize> {
        self.entries.front().copied()
    }

    pub fn occupancy(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().copied()
    }

    /// Applies one cycle's decisions. The dequeue retires the entry that was at
    /// the front during the cycle; the enqueue is appended behind everything.
    pub fn commit(&mut self, enqueue: Option<usize>, dequeue: bool) -> Result<(), EngineError> {
        let after_deq = self.entries.len() - usize::from(dequeue && !self.entries.is_empty());
        if enqueue.is_some() && after_deq >= self.capacity {
            return Err(EngineError::CapacityViolation {
                capacity: self.capacity,
            });
        }
        if dequeue {
            self.entries.pop_front();
        }
        if let Some(node) = enqueue {
            self.entries.push_back(node);
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
