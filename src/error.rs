//! Error handling

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Config IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    // Statistical fitting errors (degrade, never reach the caller of `analyze`)
    #[error("Model fit failed: {0}")]
    ModelFit(String),

    #[error("Report serialization failed: {0}")]
    Serialization(String),
}

impl EngineError {
    pub fn model_fit(msg: impl Into<String>) -> Self {
        EngineError::ModelFit(msg.into())
    }
}
