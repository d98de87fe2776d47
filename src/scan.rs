//! Per-cycle combinational decision logic.
//!
//! [`ScanController::compute`] reads only committed state and returns a
//! [`CycleDecision`]; nothing is mutated until the engine commits it at the
//! clock edge.

use crate::{
    adjacency::AdjacencyStore, level::LevelTracker, message::EngineResult, queue::FrontierQueue,
};

/// Committed state the controller reads during a cycle.
#[derive(Clone, Copy, Debug)]
pub struct ScanInputs<'a> {
    pub store: &'a AdjacencyStore,
    pub queue: &'a FrontierQueue,
    pub levels: &'a LevelTracker,
    /// Latched destination of the running query.
    pub dst: usize,
    pub start_run: bool,
    /// A result has already been sent for the running query.
    pub reported: bool,
    /// Query admitted by the receive port this cycle, as `(src, dst)`.
    pub start: Option<(usize, usize)>,
}

/// Everything one cycle decides; applied atomically by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleDecision {
    /// Frontier head scanned this cycle.
    pub node: Option<usize>,
    pub enqueue: Option<usize>,
    pub dequeue: bool,
    /// Row index of the edge consumed this cycle; implies `cur_done`.
    pub consumed: Option<usize>,
    /// Next scan offset, `0` once the head is retired.
    pub temp_iter: usize,
    pub dst: usize,
    pub start_run: bool,
    pub reported: bool,
    pub output: Option<EngineResult>,
}

impl CycleDecision {
    pub fn cur_done(&self) -> bool {
        self.consumed.is_some()
    }
}

/// Outcome of scanning one row suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowScan {
    pub found: Option<usize>,
    pub retire: bool,
    pub temp_iter: usize,
}

pub struct ScanController;

impl ScanController {
    /// Scans `node`'s row from `iter` for the first unconsumed edge. The head
    /// retires when the suffix holds no edge or the hit was the last index;
    /// otherwise it stays at the front and resumes at `temp_iter`.
    pub fn scan_row(store: &AdjacencyStore, node: usize, iter: usize) -> RowScan {
        let last = store.num_entries() - 1;
        match store.first_from(node, iter) {
            Some(i) if i == last => RowScan {
                found: Some(i),
                retire: true,
                temp_iter: 0,
            },
            Some(i) => RowScan {
                found: Some(i),
                retire: false,
                temp_iter: i + 1,
            },
            None => RowScan {
                found: None,
                retire: true,
                temp_iter: 0,
            },
        }
    }

    pub fn compute(inputs: ScanInputs<'_>) -> CycleDecision {
        let mut decision = CycleDecision {
            dst: inputs.dst,
            start_run: inputs.start_run,
            reported: inputs.reported,
            ..CycleDecision::default()
        };

        if let Some((src, dst)) = inputs.start {
            decision.enqueue = Some(src);
            decision.dst = dst;
            decision.reported = false;
        }

        if let Some(node) = inputs.queue.peek() {
            debug_assert!(inputs.start.is_none(), "query admitted while frontier busy");
            decision.node = Some(node);
            decision.start_run = true;
            let scan = Self::scan_row(inputs.store, node, inputs.levels.iter());
            if let Some(i) = scan.found {
                decision.enqueue = Some(i);
                decision.consumed = Some(i);
                if i == decision.dst && !decision.reported {
                    decision.output = Some(EngineResult::found(inputs.levels.current_level()));
                    decision.reported = true;
                }
            }
            decision.dequeue = scan.retire;
            decision.temp_iter = scan.temp_iter;
        } else if inputs.start_run {
            if !decision.reported {
                decision.output = Some(EngineResult::unreachable());
            }
            decision.start_run = false;
        }

        decision
    }
}
