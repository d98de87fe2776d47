use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid capacity: {0}")]
    InvalidCapacity(String),
    #[error("node {node} out of range for capacity {num_entries}")]
    NodeOutOfRange { node: usize, num_entries: usize },
    #[error("frontier queue capacity {capacity} exceeded")]
    CapacityViolation { capacity: usize },
    #[error("query {src}->{dst} refused: a query is still in flight")]
    QueryInFlight { src: usize, dst: usize },
    #[error("engine halted after a fatal error; reset required")]
    Halted,
    #[error("simulation timed out after {0} cycles")]
    Timeout(u64),
    #[error("unexpected output: {0}")]
    UnexpectedOutput(String),
    #[error("scenario error: {0}")]
    Scenario(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn invalid_capacity<T: Into<String>>(msg: T) -> Self {
        EngineError::InvalidCapacity(msg.into())
    }

    pub fn unexpected_output<T: Into<String>>(msg: T) -> Self {
        EngineError::UnexpectedOutput(msg.into())
    }

    pub fn scenario<T: Into<String>>(msg: T) -> Self {
        EngineError::Scenario(msg.into())
    }

    /// Whether the engine must be reset before it can tick again.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::CapacityViolation { .. } | EngineError::Halted
        )
    }
}
