use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiftForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data File Error ({path}): {reason}")]
    DataFile { path: String, reason: String },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("No training template for {0} days per week")]
    UnknownTemplate(u8),

    #[error("Exercise {0} not found")]
    ExerciseNotFound(u32),
}

pub type LfResult<T> = Result<T, LiftForgeError>;
