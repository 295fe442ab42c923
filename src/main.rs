//! commitgen - CLI entry point.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use commitgen::clipboard::copy_to_clipboard;
use commitgen::config::{
    DEFAULT_LLM_MAX_DIFF, DEFAULT_LLM_MODEL, DEFAULT_MAX_ITEMS, DEFAULT_MAX_SUBJECT, Mode,
    RawLlmOptions, RawOptions,
};
use commitgen::explain::write_explain;
use commitgen::generate::generate;
use commitgen::git::{SystemGit, ensure_git};
use commitgen::llm::{ChatTransport, HttpTransport};

/// Generate a commit message from current git changes.
#[derive(Parser, Debug)]
#[command(name = "commitgen")]
#[command(about = "Generate a commit message from current git changes")]
#[command(version)]
struct Cli {
    /// Which changes to describe: auto, staged, unstaged, all
    #[arg(long)]
    mode: Option<String>,

    /// Use staged changes
    #[arg(long)]
    staged: bool,

    /// Use unstaged and untracked changes
    #[arg(long)]
    unstaged: bool,

    /// Use staged and unstaged changes together
    #[arg(long)]
    all: bool,

    /// Message convention: conventional, plain, gitmoji
    #[arg(long, env = "COMMITGEN_FORMAT", default_value = "conventional")]
    format: String,

    /// Message language: auto, en, ru
    #[arg(long, env = "COMMITGEN_LANG", default_value = "auto")]
    lang: String,

    /// Force the commit type
    #[arg(long = "type", env = "COMMITGEN_TYPE", default_value = "")]
    commit_type: String,

    /// Force the scope
    #[arg(long, env = "COMMITGEN_SCOPE", default_value = "")]
    scope: String,

    /// Mark as a breaking change
    #[arg(long)]
    breaking: bool,

    /// Body mode: auto, none, files, stats, summary
    #[arg(long, env = "COMMITGEN_BODY", default_value = "auto")]
    body: String,

    /// Maximum items in a body list
    #[arg(long, env = "COMMITGEN_MAX_ITEMS", default_value_t = DEFAULT_MAX_ITEMS)]
    max_items: usize,

    /// Maximum subject length in characters
    #[arg(long, env = "COMMITGEN_MAX_SUBJECT", default_value_t = DEFAULT_MAX_SUBJECT)]
    max_subject: usize,

    /// Issue references for a `Refs:` footer (comma or space separated)
    #[arg(long, env = "COMMITGEN_REFS", default_value = "")]
    refs: String,

    /// Issues for a `Closes:` footer (comma or space separated)
    #[arg(long, env = "COMMITGEN_CLOSES", default_value = "")]
    closes: String,

    /// Prepend a gitmoji code to the subject
    #[arg(long)]
    emoji: bool,

    /// Print the reasoning to stderr
    #[arg(long)]
    explain: bool,

    /// Copy the result to the clipboard if possible
    #[arg(long)]
    copy: bool,

    #[command(flatten)]
    llm: LlmArgs,
}

/// Optional remote model settings.
#[derive(clap::Args, Debug)]
struct LlmArgs {
    /// Ask an LLM to write the message
    #[arg(long, env = "COMMITGEN_LLM")]
    llm: bool,

    /// LLM provider: openai, openrouter
    #[arg(long, env = "COMMITGEN_LLM_PROVIDER", default_value = "")]
    provider: String,

    /// LLM model name
    #[arg(long, env = "COMMITGEN_LLM_MODEL", default_value = DEFAULT_LLM_MODEL)]
    model: String,

    /// Override the LLM endpoint URL
    #[arg(long, env = "COMMITGEN_LLM_ENDPOINT", default_value = "")]
    endpoint: String,

    /// LLM API key (prefer the environment)
    #[arg(long = "llm-key", env = "COMMITGEN_LLM_KEY", default_value = "", hide_env_values = true)]
    key: String,

    /// Sampling temperature; negative leaves it unset
    #[arg(long, env = "COMMITGEN_LLM_TEMPERATURE", default_value_t = 1.0, allow_negative_numbers = true)]
    temperature: f64,

    /// Completion token limit; zero or negative leaves it unset
    #[arg(long, env = "COMMITGEN_LLM_MAX_TOKENS", default_value_t = 300, allow_negative_numbers = true)]
    max_tokens: i64,

    /// Maximum diff bytes sent to the LLM
    #[arg(long = "llm-max-diff", env = "COMMITGEN_LLM_MAX_DIFF", default_value_t = DEFAULT_LLM_MAX_DIFF)]
    max_diff: usize,

    /// Fail instead of falling back when the LLM request fails
    #[arg(long = "llm-strict", env = "COMMITGEN_LLM_STRICT")]
    strict: bool,

    /// Override the LLM system prompt
    #[arg(long = "llm-system", env = "COMMITGEN_LLM_SYSTEM", default_value = "")]
    system: String,

    /// Extra instructions appended to the LLM user prompt
    #[arg(long = "llm-user", env = "COMMITGEN_LLM_USER", default_value = "")]
    user: String,

    /// OpenRouter HTTP-Referer header
    #[arg(long = "llm-referer", env = "COMMITGEN_OPENROUTER_REFERER", default_value = "")]
    referer: String,

    /// OpenRouter X-Title header
    #[arg(long = "llm-title", env = "COMMITGEN_OPENROUTER_TITLE", default_value = "commitgen")]
    title: String,
}

impl Cli {
    /// `--mode` wins over the boolean flags; `--all` over `--staged` over
    /// `--unstaged`.
    fn resolved_mode(&self) -> String {
        if let Some(mode) = self.mode.as_deref().filter(|m| !m.is_empty()) {
            return mode.to_string();
        }
        let mode = if self.all {
            Mode::All
        } else if self.staged {
            Mode::Staged
        } else if self.unstaged {
            Mode::Unstaged
        } else {
            Mode::Auto
        };
        mode.to_string()
    }

    fn into_raw(self) -> RawOptions {
        RawOptions {
            mode: self.resolved_mode(),
            format: self.format,
            lang: self.lang,
            commit_type: self.commit_type,
            scope: self.scope,
            breaking: self.breaking,
            body: self.body,
            max_items: self.max_items,
            max_subject: self.max_subject,
            refs: self.refs,
            closes: self.closes,
            emoji: self.emoji,
            explain: self.explain,
            copy: self.copy,
            llm: RawLlmOptions {
                enabled: self.llm.llm,
                provider: self.llm.provider,
                model: self.llm.model,
                endpoint: self.llm.endpoint,
                api_key: self.llm.key,
                temperature: self.llm.temperature,
                max_tokens: self.llm.max_tokens,
                max_diff: self.llm.max_diff,
                strict: self.llm.strict,
                system: self.llm.system,
                user: self.llm.user,
                referer: self.llm.referer,
                title: self.llm.title,
            },
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(Level::WARN);

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    ensure_git()?;
    let opts = cli.into_raw().validate()?;

    let transport = match &opts.llm {
        Some(_) => Some(HttpTransport::new().context("Failed to build HTTP client")?),
        None => None,
    };

    let outcome = generate(
        &SystemGit::new(),
        &opts,
        transport.as_ref().map(|t| t as &dyn ChatTransport),
    )
    .await?;

    println!("{}", outcome.message);

    if opts.copy
        && let Err(e) = copy_to_clipboard(&outcome.message)
    {
        warn!("copy failed: {}", e);
    }

    if opts.explain {
        write_explain(
            &mut io::stderr(),
            &opts,
            outcome.mode,
            outcome.change_count,
            &outcome.classification,
            outcome.llm_used,
        )
        .context("Failed to write explanation")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["commitgen"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_mode_precedence() {
        temp_env::with_vars_unset(["COMMITGEN_FORMAT", "COMMITGEN_LLM"], || {
            assert_eq!(parse(&[]).resolved_mode(), "auto");
            assert_eq!(parse(&["--unstaged", "--staged"]).resolved_mode(), "staged");
            assert_eq!(parse(&["--staged", "--all"]).resolved_mode(), "all");
            assert_eq!(parse(&["--all", "--mode", "unstaged"]).resolved_mode(), "unstaged");
        });
    }

    #[test]
    fn test_env_defaults() {
        temp_env::with_vars(
            [
                ("COMMITGEN_FORMAT", Some("gitmoji")),
                ("COMMITGEN_MAX_ITEMS", Some("3")),
                ("COMMITGEN_REFS", Some("#1, #2")),
            ],
            || {
                let raw = parse(&[]).into_raw();
                assert_eq!(raw.format, "gitmoji");
                assert_eq!(raw.max_items, 3);
                assert_eq!(raw.refs, "#1, #2");

                let raw = parse(&["--format", "plain"]).into_raw();
                assert_eq!(raw.format, "plain");
            },
        );
    }

    #[test]
    fn test_negative_llm_numbers() {
        let raw = parse(&["--temperature", "-1", "--max-tokens", "-5"]).into_raw();
        assert_eq!(raw.llm.temperature, -1.0);
        assert_eq!(raw.llm.max_tokens, -5);
    }
}
