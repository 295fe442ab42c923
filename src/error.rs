//! Error types for commitgen modules using thiserror.

use thiserror::Error;

use crate::config::Mode;

/// Errors from option validation. Raised before any git command runs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported lang: {0}")]
    UnsupportedLanguage(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported body mode: {0}")]
    UnsupportedBodyMode(String),

    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    #[error("unsupported commit type: {0} (expected one of feat, fix, docs, test, refactor, perf, style, build, ci, chore)")]
    UnsupportedCommitType(String),

    #[error("unsupported llm provider: {0}")]
    UnsupportedProvider(String),
}

/// Errors from invoking the system `git` binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git is not available in PATH")]
    NotInstalled,

    #[error("not a git repository")]
    NotARepository,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with code {code}: {stderr}")]
    NonZeroExit {
        operation: String,
        code: i32,
        stderr: String,
    },
}

/// Errors from the optional remote-model generator.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("llm model is required (use --model or COMMITGEN_LLM_MODEL)")]
    MissingModel,

    #[error("llm api key is required (use env or --llm-key)")]
    MissingApiKey,

    #[error("llm request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("llm http {status}: {body}")]
    Http { status: u16, body: String },

    #[error("llm response could not be decoded: {0}")]
    InvalidResponse(String),

    #[error("llm response has no choices")]
    NoChoices,

    #[error("llm response content is empty")]
    EmptyContent,

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<LlmError>),
}

impl LlmError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Transport(_) => true,
            LlmError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Errors from the end-to-end generation pipeline.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("no changes found for mode {mode}")]
    NoChanges { mode: Mode },
}

/// Errors from clipboard integration.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("no clipboard command found")]
    NoCommand,

    #[error("Failed to run {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}
