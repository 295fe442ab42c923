//! Option resolution and validation.
//!
//! The CLI (and its `COMMITGEN_*` environment defaults) fills a [`RawOptions`]
//! with loosely typed values. [`RawOptions::validate`] turns it into
//! [`Options`] or fails with a [`ConfigError`] before any git command runs.

use std::env;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::classify::CommitType;
use crate::error::ConfigError;

/// Default cap on body list items.
pub const DEFAULT_MAX_ITEMS: usize = 8;

/// Default subject length limit, in characters.
pub const DEFAULT_MAX_SUBJECT: usize = 72;

/// Default cap on diff bytes sent to the LLM.
pub const DEFAULT_LLM_MAX_DIFF: usize = 20_000;

/// Default LLM model name.
pub const DEFAULT_LLM_MODEL: &str = "gpt-5-nano";

/// Which slice of the working tree to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Auto,
    Staged,
    Unstaged,
    All,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::Staged => "staged",
            Mode::Unstaged => "unstaged",
            Mode::All => "all",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "auto" => Ok(Self::Auto),
            "staged" => Ok(Self::Staged),
            "unstaged" => Ok(Self::Unstaged),
            "all" => Ok(Self::All),
            _ => Err(ConfigError::UnsupportedMode(s.to_string())),
        }
    }
}

/// Message convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Conventional,
    Plain,
    Gitmoji,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Conventional => "conventional",
            Format::Plain => "plain",
            Format::Gitmoji => "gitmoji",
        }
    }

    /// Whether the subject carries a `type(scope)!: ` prefix.
    pub fn has_type_prefix(&self) -> bool {
        matches!(self, Format::Conventional | Format::Gitmoji)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conventional" => Ok(Self::Conventional),
            "plain" => Ok(Self::Plain),
            "gitmoji" => Ok(Self::Gitmoji),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// What goes under the subject line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyMode {
    #[default]
    Auto,
    None,
    Files,
    Stats,
    Summary,
}

impl BodyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyMode::Auto => "auto",
            BodyMode::None => "none",
            BodyMode::Files => "files",
            BodyMode::Stats => "stats",
            BodyMode::Summary => "summary",
        }
    }
}

impl fmt::Display for BodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "none" => Ok(Self::None),
            "files" => Ok(Self::Files),
            "stats" => Ok(Self::Stats),
            "summary" => Ok(Self::Summary),
            _ => Err(ConfigError::UnsupportedBodyMode(s.to_string())),
        }
    }
}

/// Natural language of the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    /// Detect the language from `LC_ALL`, then `LANG`.
    ///
    /// The first non-empty variable decides; anything that is not Russian
    /// resolves to English.
    pub fn detect() -> Self {
        for key in ["LC_ALL", "LANG"] {
            let value = env::var(key).unwrap_or_default().trim().to_lowercase();
            if value.is_empty() {
                continue;
            }
            debug!("Detecting language from {}={}", key, value);
            if value.starts_with("ru") || value.contains("_ru") {
                return Language::Ru;
            }
            return Language::En;
        }
        Language::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated options as they come from flags and environment.
#[derive(Debug, Clone)]
pub struct RawOptions {
    pub mode: String,
    pub format: String,
    pub lang: String,
    pub commit_type: String,
    pub scope: String,
    pub breaking: bool,
    pub body: String,
    pub max_items: usize,
    pub max_subject: usize,
    pub refs: String,
    pub closes: String,
    pub emoji: bool,
    pub explain: bool,
    pub copy: bool,
    pub llm: RawLlmOptions,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Auto.to_string(),
            format: Format::Conventional.to_string(),
            lang: "auto".to_string(),
            commit_type: String::new(),
            scope: String::new(),
            breaking: false,
            body: BodyMode::Auto.to_string(),
            max_items: DEFAULT_MAX_ITEMS,
            max_subject: DEFAULT_MAX_SUBJECT,
            refs: String::new(),
            closes: String::new(),
            emoji: false,
            explain: false,
            copy: false,
            llm: RawLlmOptions::default(),
        }
    }
}

/// Raw LLM settings.
#[derive(Debug, Clone)]
pub struct RawLlmOptions {
    pub enabled: bool,
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    pub api_key: String,
    pub temperature: f64,
    pub max_tokens: i64,
    pub max_diff: usize,
    pub strict: bool,
    pub system: String,
    pub user: String,
    pub referer: String,
    pub title: String,
}

impl Default for RawLlmOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: String::new(),
            model: DEFAULT_LLM_MODEL.to_string(),
            endpoint: String::new(),
            api_key: String::new(),
            temperature: 1.0,
            max_tokens: 300,
            max_diff: DEFAULT_LLM_MAX_DIFF,
            strict: false,
            system: String::new(),
            user: String::new(),
            referer: String::new(),
            title: "commitgen".to_string(),
        }
    }
}

/// LLM provider flavor. Both speak the OpenAI chat-completions dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    OpenAi,
    OpenRouter,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::OpenRouter => "openrouter",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "openai" => Ok(Self::OpenAi),
            "openrouter" => Ok(Self::OpenRouter),
            _ => Err(ConfigError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Validated LLM settings.
#[derive(Debug, Clone)]
pub struct LlmOptions {
    pub provider: Provider,
    pub model: String,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub max_diff: usize,
    pub strict: bool,
    pub system: Option<String>,
    pub user: Option<String>,
    pub referer: Option<String>,
    pub title: Option<String>,
}

/// Validated options driving one run.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: Mode,
    pub format: Format,
    pub lang: Language,
    pub commit_type: Option<CommitType>,
    pub scope: Option<String>,
    pub breaking: bool,
    pub body: BodyMode,
    pub max_items: usize,
    pub max_subject: usize,
    pub refs: Vec<String>,
    pub closes: Vec<String>,
    pub emoji: bool,
    pub explain: bool,
    pub copy: bool,
    /// `None` unless the LLM pass is enabled.
    pub llm: Option<LlmOptions>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            format: Format::Conventional,
            lang: Language::En,
            commit_type: None,
            scope: None,
            breaking: false,
            body: BodyMode::Auto,
            max_items: DEFAULT_MAX_ITEMS,
            max_subject: DEFAULT_MAX_SUBJECT,
            refs: Vec::new(),
            closes: Vec::new(),
            emoji: false,
            explain: false,
            copy: false,
            llm: None,
        }
    }
}

impl RawOptions {
    /// Validate and normalize every option.
    pub fn validate(self) -> Result<Options, ConfigError> {
        let lang = match self.lang.trim() {
            "" | "auto" => Language::detect(),
            "en" => Language::En,
            "ru" => Language::Ru,
            other => return Err(ConfigError::UnsupportedLanguage(other.to_string())),
        };
        let format: Format = self.format.trim().parse()?;
        let body: BodyMode = self.body.trim().parse()?;
        let mode: Mode = self.mode.trim().parse()?;

        let commit_type = match self.commit_type.trim() {
            "" => None,
            raw => Some(
                raw.parse::<CommitType>()
                    .map_err(|_| ConfigError::UnsupportedCommitType(raw.to_string()))?,
            ),
        };

        let llm = if self.llm.enabled {
            Some(self.llm.validate()?)
        } else {
            None
        };

        Ok(Options {
            mode,
            format,
            lang,
            commit_type,
            scope: non_empty(&self.scope),
            breaking: self.breaking,
            body,
            max_items: if self.max_items == 0 { DEFAULT_MAX_ITEMS } else { self.max_items },
            max_subject: if self.max_subject == 0 { DEFAULT_MAX_SUBJECT } else { self.max_subject },
            refs: split_list(&self.refs),
            closes: split_list(&self.closes),
            emoji: self.emoji,
            explain: self.explain,
            copy: self.copy,
            llm,
        })
    }
}

impl RawLlmOptions {
    fn validate(self) -> Result<LlmOptions, ConfigError> {
        Ok(LlmOptions {
            provider: self.provider.parse()?,
            model: self.model.trim().to_string(),
            endpoint: non_empty(&self.endpoint),
            api_key: non_empty(&self.api_key),
            temperature: (self.temperature >= 0.0).then_some(self.temperature),
            max_tokens: u32::try_from(self.max_tokens).ok().filter(|&n| n > 0),
            max_diff: if self.max_diff == 0 { DEFAULT_LLM_MAX_DIFF } else { self.max_diff },
            strict: self.strict,
            system: non_empty(&self.system),
            user: non_empty(&self.user),
            referer: non_empty(&self.referer),
            title: non_empty(&self.title),
        })
    }
}

/// Split a comma/whitespace separated list, dropping empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
