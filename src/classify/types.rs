//! Classification vocabulary.

use std::fmt;

/// Conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
}

impl CommitType {
    pub const ALL: [CommitType; 10] = [
        Self::Feat,
        Self::Fix,
        Self::Docs,
        Self::Style,
        Self::Refactor,
        Self::Perf,
        Self::Test,
        Self::Build,
        Self::Ci,
        Self::Chore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

/// Caller-supplied values that take precedence over detection.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub commit_type: Option<CommitType>,
    pub scope: Option<String>,
    pub breaking: bool,
}

/// Verdict of the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub commit_type: CommitType,
    /// Short justifications, for diagnostics only.
    pub reasons: Vec<String>,
    /// Sanitized scope; empty when none applies.
    pub scope: String,
    pub breaking: bool,
    /// Footer note; empty when not applicable.
    pub breaking_note: String,
}
