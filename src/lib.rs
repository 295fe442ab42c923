//! commitgen - derive a commit message from the working tree.
//!
//! # Overview
//!
//! commitgen reads git's machine-readable status and diff output, classifies
//! the change with deterministic rules (type, scope, breaking change), and
//! renders a Conventional Commits, gitmoji, or plain message. An optional
//! LLM pass can rewrite the heuristic draft.

pub mod classify;
pub mod clipboard;
pub mod compose;
pub mod config;
pub mod error;
pub mod explain;
pub mod generate;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use classify::{ClassificationResult, CommitType, Overrides, classify};
pub use compose::{ParsedHeader, RenderedMessage, compose, parse_header};
pub use config::{BodyMode, Format, Language, Mode, Options, RawOptions};
pub use error::{ClipboardError, ConfigError, GenerateError, GitError, LlmError};
pub use generate::{Outcome, generate};
pub use git::{ChangeRecord, ChangeStatus, StatRecord};
