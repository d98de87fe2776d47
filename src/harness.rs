//! Cycle-by-cycle driver: feeds one input event per cycle, collects result
//! words and bounds the run.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::{
    engine::SsspEngine,
    errors::EngineError,
    message::{EngineMsg, EngineResult},
    trace::line_trace,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub cycles: u64,
    /// Result events with the cycle they were sent on.
    pub outputs: Vec<(u64, EngineResult)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub traces: Vec<String>,
}

impl SimReport {
    pub fn results(&self) -> Vec<EngineResult> {
        self.outputs.iter().map(|(_, result)| *result).collect()
    }
}

pub struct Harness {
    engine: SsspEngine,
    source: VecDeque<EngineMsg>,
    sink: Option<VecDeque<u64>>,
    trace: bool,
}

impl Harness {
    pub fn new<I>(engine: SsspEngine, events: I) -> Self
    where
        I: IntoIterator<Item = EngineMsg>,
    {
        Self {
            engine,
            source: events.into_iter().collect(),
            sink: None,
            trace: false,
        }
    }

    /// Expected result words, in order. The run ends once all are received.
    pub fn expect<I>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.sink = Some(words.into_iter().collect());
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    pub fn engine(&self) -> &SsspEngine {
        &self.engine
    }

    pub fn into_engine(self) -> SsspEngine {
        self.engine
    }

    pub fn push_events<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = EngineMsg>,
    {
        self.source.extend(events);
    }

    pub fn done(&self) -> bool {
        if !self.source.is_empty() {
            return false;
        }
        match &self.sink {
            Some(expected) => expected.is_empty(),
            None => self.engine.is_idle(),
        }
    }

    /// Ticks until [`Harness::done`] or `max_cycles` cycles have elapsed in
    /// this call.
    pub fn run(&mut self, max_cycles: u64) -> Result<SimReport, EngineError> {
        let mut report = SimReport::default();
        let start = self.engine.stats().cycles;
        while !self.done() {
            if report.cycles >= max_cycles {
                return Err(EngineError::Timeout(max_cycles));
            }
            let cycle = self.engine.stats().cycles - start;
            if let Some(result) = self.step()? {
                self.check_sink(&result)?;
                report.outputs.push((cycle, result));
            }
            if self.trace {
                report
                    .traces
                    .push(format!("{cycle}:{}", line_trace(&self.engine)));
            }
            report.cycles += 1;
        }
        debug!(cycles = report.cycles, outputs = report.outputs.len(), "simulation finished");
        Ok(report)
    }

    fn step(&mut self) -> Result<Option<EngineResult>, EngineError> {
        let input = self.source.pop_front();
        match self.engine.tick(input) {
            Err(EngineError::QueryInFlight { .. }) => {
                // Refused events are offered again next cycle.
                if let Some(msg) = input {
                    self.source.push_front(msg);
                }
                self.engine.tick(None)
            }
            other => other,
        }
    }

    fn check_sink(&mut self, result: &EngineResult) -> Result<(), EngineError> {
        let word = result.encode(self.engine.widths());
        let Some(expected) = self.sink.as_mut() else {
            return Ok(());
        };
        match expected.pop_front() {
            Some(want) if want == word => Ok(()),
            Some(want) => Err(EngineError::unexpected_output(format!(
                "received {word}, expected {want}"
            ))),
            None => Err(EngineError::unexpected_output(format!(
                "received {word} after all expected results"
            ))),
        }
    }
}
