use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    config::{EngineConfig, QueryPolicy},
    engine::{EngineStats, SsspEngine},
    errors::EngineError,
    harness::Harness,
    message::{EngineMsg, EngineResult},
};

/// A graph plus the queries to run on it, as read from JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub num_entries: usize,
    #[serde(default)]
    pub edges: Vec<(usize, usize)>,
    #[serde(default)]
    pub queries: Vec<(usize, usize)>,
    #[serde(default)]
    pub query_policy: QueryPolicy,
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    pub src: usize,
    pub dst: usize,
    pub result: EngineResult,
    /// Cycles from the first registration event to the result.
    pub latency: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub outcomes: Vec<QueryOutcome>,
    pub stats: EngineStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub traces: Vec<String>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.config().validate()?;
        let in_range =
            |&(src, dst): &(usize, usize)| src < self.num_entries && dst < self.num_entries;
        if let Some(edge) = self.edges.iter().find(|e| !in_range(*e)) {
            return Err(EngineError::scenario(format!(
                "edge {}->{} outside 0..{}",
                edge.0, edge.1, self.num_entries
            )));
        }
        if let Some(query) = self.queries.iter().find(|q| !in_range(*q)) {
            return Err(EngineError::scenario(format!(
                "query {}->{} outside 0..{}",
                query.0, query.1, self.num_entries
            )));
        }
        Ok(())
    }

    pub fn config(&self) -> EngineConfig {
        let config = EngineConfig::new(self.num_entries).with_query_policy(self.query_policy);
        match self.max_cycles {
            Some(max) => config.with_max_cycles(max),
            None => config,
        }
    }

    /// Registration events followed by a query. Re-registering before each
    /// query restores edges the previous query consumed.
    pub fn events_for(&self, src: usize, dst: usize) -> Vec<EngineMsg> {
        let mut events: Vec<EngineMsg> = self
            .edges
            .iter()
            .map(|&(from, to)| EngineMsg::edge(from, to))
            .collect();
        events.push(EngineMsg::query(src, dst));
        events
    }

    /// Runs every query on one engine instance, each on a freshly restored graph.
    pub fn run(&self, trace: bool) -> Result<ScenarioReport, EngineError> {
        let config = self.config();
        let max_cycles = config.max_cycles;
        let mut engine = SsspEngine::new(config)?;
        let mut outcomes = Vec::with_capacity(self.queries.len());
        let mut traces = Vec::new();
        for &(src, dst) in &self.queries {
            let mut harness = Harness::new(engine, self.events_for(src, dst)).with_trace(trace);
            let report = harness.run(max_cycles)?;
            let (latency, result) = match report.outputs.as_slice() {
                [single] => *single,
                other => {
                    return Err(EngineError::unexpected_output(format!(
                        "query {src}->{dst} produced {} results",
                        other.len()
                    )));
                }
            };
            outcomes.push(QueryOutcome {
                src,
                dst,
                result,
                latency,
            });
            traces.extend(report.traces);
            engine = harness.into_engine();
        }
        Ok(ScenarioReport {
            outcomes,
            stats: engine.stats().clone(),
            traces,
        })
    }
}
