//! Cycle-accurate single-source shortest-path engine.
//!
//! The engine is a clocked state machine: edges and queries stream in one event
//! per cycle, a bounded frontier queue drives a resumable row scan over a dense
//! adjacency bitmap, and the hop count of the shortest path is sent out as soon
//! as the destination is discovered. Drive it directly with [`SsspEngine::tick`]
//! or through the cycle-bounded [`Harness`].

pub mod adjacency;
pub mod bench_utils;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod harness;
pub mod level;
pub mod message;
pub mod queue;
pub mod reference;
pub mod scan;
pub mod scenario;
pub mod trace;

pub use crate::adjacency::AdjacencyStore;
pub use crate::config::{BitWidths, EngineConfig, QueryPolicy};
pub use crate::engine::{EnginePhase, EngineStats, ResumeState, SsspEngine};
pub use crate::errors::EngineError;
pub use crate::harness::{Harness, SimReport};
pub use crate::level::LevelTracker;
pub use crate::message::{EngineMsg, EngineResult};
pub use crate::queue::FrontierQueue;
pub use crate::scan::{CycleDecision, ScanController};
pub use crate::scenario::{QueryOutcome, Scenario, ScenarioReport};
