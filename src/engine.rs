use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::{
    adjacency::AdjacencyStore,
    config::{BitWidths, EngineConfig, QueryPolicy},
    errors::EngineError,
    level::LevelTracker,
    message::{EngineMsg, EngineResult},
    queue::FrontierQueue,
    scan::{CycleDecision, ScanController, ScanInputs},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EnginePhase {
    Idle,
    Running,
    DonePending,
}

/// Scan registers carried between cycles. `iter` lives in the level tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResumeState {
    pub node: usize,
    pub temp_iter: usize,
    pub cur_done: bool,
    pub start_run: bool,
    pub reported: bool,
    pub dst: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub cycles: u64,
    pub enqueues: u64,
    pub dequeues: u64,
    pub edges_consumed: u64,
    pub queries_started: u64,
    pub queries_completed: u64,
    pub queries_deferred: u64,
}

/// Cycle-stepped single-source shortest-path engine.
///
/// Each [`SsspEngine::tick`] is one clock cycle: the receive port admits at
/// most one event, [`ScanController::compute`] derives the cycle's decisions
/// from committed state, then every register commits at once.
pub struct SsspEngine {
    config: EngineConfig,
    widths: BitWidths,
    store: AdjacencyStore,
    queue: FrontierQueue,
    levels: LevelTracker,
    resume: ResumeState,
    pending: VecDeque<(usize, usize)>,
    last: CycleDecision,
    stats: EngineStats,
    halted: bool,
}

impl SsspEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let widths = config.widths();
        Ok(Self {
            store: AdjacencyStore::new(config.num_entries),
            queue: FrontierQueue::new(config.queue_capacity()),
            levels: LevelTracker::new(&widths),
            resume: ResumeState::default(),
            pending: VecDeque::new(),
            last: CycleDecision::default(),
            stats: EngineStats::default(),
            halted: false,
            widths,
            config,
        })
    }

    pub fn with_entries(num_entries: usize) -> Result<Self, EngineError> {
        Self::new(EngineConfig::new(num_entries))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn widths(&self) -> &BitWidths {
        &self.widths
    }

    pub fn num_entries(&self) -> usize {
        self.config.num_entries
    }

    pub fn store(&self) -> &AdjacencyStore {
        &self.store
    }

    pub fn queue(&self) -> &FrontierQueue {
        &self.queue
    }

    pub fn levels(&self) -> &LevelTracker {
        &self.levels
    }

    pub fn resume(&self) -> &ResumeState {
        &self.resume
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// Decisions taken by the most recent cycle.
    pub fn last_decision(&self) -> &CycleDecision {
        &self.last
    }

    pub fn pending_queries(&self) -> usize {
        self.pending.len()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn phase(&self) -> EnginePhase {
        if !self.queue.is_empty() {
            EnginePhase::Running
        } else if self.resume.start_run {
            EnginePhase::DonePending
        } else {
            EnginePhase::Idle
        }
    }

    /// No query running, draining or waiting.
    pub fn is_idle(&self) -> bool {
        self.phase() == EnginePhase::Idle && self.pending.is_empty()
    }

    /// Receive port readiness. The engine never back-pressures its input.
    pub fn recv_ready(&self) -> bool {
        true
    }

    /// Runs one clock cycle with an optional input event and returns the
    /// result word sent this cycle, if any.
    pub fn tick(&mut self, input: Option<EngineMsg>) -> Result<Option<EngineResult>, EngineError> {
        if self.halted {
            return Err(EngineError::Halted);
        }
        if let Some(msg) = &input {
            self.check_node(msg.src)?;
            self.check_node(msg.dst)?;
        }

        let busy = self.phase() != EnginePhase::Idle;
        if let Some(msg) = input.filter(|msg| msg.run) {
            if busy && self.config.query_policy == QueryPolicy::Reject {
                warn!(src = msg.src, dst = msg.dst, "query rejected while busy");
                return Err(EngineError::QueryInFlight {
                    src: msg.src,
                    dst: msg.dst,
                });
            }
            if busy || !self.pending.is_empty() {
                debug!(src = msg.src, dst = msg.dst, "query deferred");
                self.stats.queries_deferred += 1;
            }
            self.pending.push_back((msg.src, msg.dst));
        }
        let start = if busy { None } else { self.pending.pop_front() };

        let decision = ScanController::compute(ScanInputs {
            store: &self.store,
            queue: &self.queue,
            levels: &self.levels,
            dst: self.resume.dst,
            start_run: self.resume.start_run,
            reported: self.resume.reported,
            start,
        });

        self.commit(input, start, &decision)?;
        Ok(decision.output)
    }

    fn commit(
        &mut self,
        input: Option<EngineMsg>,
        start: Option<(usize, usize)>,
        decision: &CycleDecision,
    ) -> Result<(), EngineError> {
        let occupancy = self.queue.occupancy();
        if let Err(err) = self.queue.commit(decision.enqueue, decision.dequeue) {
            warn!(cycle = self.stats.cycles, error = %err, "frontier overflow, halting");
            self.halted = true;
            return Err(err);
        }

        if let Some(msg) = input.filter(|msg| msg.init) {
            self.store.set(msg.src, msg.dst);
        }
        if let (Some(node), Some(i)) = (decision.node, decision.consumed) {
            self.store.clear(node, i);
            self.stats.edges_consumed += 1;
        }

        if let Some((src, dst)) = start {
            debug!(src, dst, "query started");
            self.levels.begin_query();
            self.stats.queries_started += 1;
        }
        if occupancy > 0 {
            self.levels
                .advance(occupancy, decision.dequeue, decision.temp_iter);
        }

        self.resume = ResumeState {
            node: decision.node.unwrap_or(self.resume.node),
            temp_iter: decision.temp_iter,
            cur_done: decision.cur_done(),
            start_run: decision.start_run,
            reported: decision.reported,
            dst: decision.dst,
        };

        if let Some(result) = decision.output {
            debug!(hops = result.hops, found = result.found, "query result");
            self.stats.queries_completed += 1;
        }
        trace!(
            cycle = self.stats.cycles,
            node = ?decision.node,
            enqueue = ?decision.enqueue,
            dequeue = decision.dequeue,
            step = self.levels.step(),
            cur_count = self.levels.cur_count(),
            "cycle committed"
        );

        self.stats.enqueues += u64::from(decision.enqueue.is_some());
        self.stats.dequeues += u64::from(decision.dequeue);
        self.stats.cycles += 1;
        self.last = *decision;
        Ok(())
    }

    /// Clears the frontier, scan and level registers. Registered edges survive.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.levels.reset();
        self.resume = ResumeState::default();
        self.pending.clear();
        self.last = CycleDecision::default();
        self.halted = false;
    }

    /// [`SsspEngine::reset`] plus an empty adjacency store and zeroed stats.
    pub fn reset_all(&mut self) {
        self.reset();
        self.store.wipe();
        self.stats = EngineStats::default();
    }

    fn check_node(&self, node: usize) -> Result<(), EngineError> {
        if node >= self.config.num_entries {
            return Err(EngineError::NodeOutOfRange {
                node,
                num_entries: self.config.num_entries,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(engine: &mut SsspEngine) -> Vec<EngineResult> {
        let mut outputs = Vec::new();
        while !engine.is_idle() {
            outputs.extend(engine.tick(None).unwrap());
        }
        outputs
    }

    #[test]
    fn test_capacity_violation_halts_until_reset() {
        let mut engine = SsspEngine::with_entries(3).unwrap();
        engine.queue = FrontierQueue::new(1);
        engine.tick(Some(EngineMsg::edge(0, 1))).unwrap();
        engine.tick(Some(EngineMsg::query(0, 2))).unwrap();
        let cycles = engine.stats().cycles;

        // Head 0 keeps its slot while 1 is enqueued behind it.
        let err = engine.tick(None).unwrap_err();
        assert!(matches!(err, EngineError::CapacityViolation { capacity: 1 }));
        assert!(err.is_fatal());
        assert!(engine.is_halted());
        assert_eq!(engine.stats().cycles, cycles);
        assert!(engine.store().get(0, 1), "aborted cycle must not consume the edge");

        let err = engine.tick(Some(EngineMsg::edge(1, 2))).unwrap_err();
        assert!(matches!(err, EngineError::Halted));
        assert!(err.is_fatal());
        assert!(!engine.store().get(1, 2));

        engine.reset();
        assert!(!engine.is_halted());
        assert!(engine.is_idle());
        engine.tick(Some(EngineMsg::query(2, 0))).unwrap();
        assert_eq!(drain(&mut engine), vec![EngineResult::unreachable()]);
    }

    #[test]
    fn test_refused_query_is_not_fatal() {
        let err = EngineError::QueryInFlight { src: 0, dst: 1 };
        assert!(!err.is_fatal());
        assert!(!EngineError::Timeout(5).is_fatal());
    }
}
