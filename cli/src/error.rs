//! CLI-specific error types and exit code mapping

use scanwise_core::CoreError;

/// CLI-facing error type; each variant carries enough context for a
/// user-friendly message.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad flag combinations or unusable configuration values.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The command needs a signed-in user (`--uid`/`--token`).
    #[error("authentication required: {0}")]
    Auth(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (image read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from scanwise-core.
    #[error("{0}")]
    Core(#[from] CoreError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning               |
    /// |------|-----------------------|
    /// | 0    | Success               |
    /// | 1    | General/command error |
    /// | 2    | Configuration error   |
    /// | 3    | Missing credentials   |
    /// | 10   | IO error              |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Auth(_) => 3,
            Self::Io(_) => 10,
            Self::Command(_) | Self::JsonSerialize(_) | Self::Core(_) => 1,
        }
    }
}
