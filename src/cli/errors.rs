use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Conflicting arguments: {first} and {second}")]
    ConflictingArguments { first: String, second: String },

    #[error("No thumbnail sizes configured; pass --size or a --config with sizes")]
    NoSizes,

    #[error("Batch finished with {errors} error(s)")]
    BatchFailed { errors: usize },

    #[error(transparent)]
    Thumbkit(#[from] thumbkit::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}
