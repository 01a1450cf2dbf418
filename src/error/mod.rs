mod context;
mod exit_codes;
mod format;
#[cfg(test)]
mod tests;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::format_error_chain;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandasError {
    #[error("No C/C++ toolchain found")]
    ToolchainNotFound { searched: String },

    #[error("Toolchain probe failed: {0}")]
    ToolchainProbe(String),

    #[error("Unrecognized toolchain output: {0}")]
    UnrecognizedOutput(String),

    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),

    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LandasError>;
