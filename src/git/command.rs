//! Raw input collection by shelling out to the system `git` binary.
//!
//! Uses `std::process::Command` so the user's git config applies. The
//! [`GitRunner`] seam lets tests feed canned output instead.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::config::Mode;
use crate::error::GitError;

use super::numstat::{StatRecord, combine_stats, parse_numstat};
use super::status::{ChangeRecord, Origin, parse_name_status, parse_untracked};

/// Runs git with the given arguments and returns its stdout.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<Vec<u8>, GitError>;
}

/// Runner backed by the `git` executable.
#[derive(Debug, Clone, Default)]
pub struct SystemGit {
    work_dir: Option<PathBuf>,
}

impl SystemGit {
    /// Run git in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git inside `path`.
    pub fn in_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(path.into()),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<Vec<u8>, GitError> {
        let operation = args.first().copied().unwrap_or_default().to_string();

        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| GitError::SpawnFailed {
            operation: operation.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(GitError::NonZeroExit {
                operation,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// Check that git is installed and on PATH.
pub fn ensure_git() -> Result<(), GitError> {
    which::which("git").map_err(|_| GitError::NotInstalled)?;
    Ok(())
}

/// Check that the runner operates inside a work tree.
pub fn ensure_repository<R: GitRunner + ?Sized>(runner: &R) -> Result<(), GitError> {
    runner
        .run(&["rev-parse", "--show-toplevel"])
        .map(|_| ())
        .map_err(|e| {
            debug!("rev-parse failed: {}", e);
            GitError::NotARepository
        })
}

/// Collect staged records and unstaged records (untracked files appended).
pub fn collect_changes<R: GitRunner + ?Sized>(
    runner: &R,
) -> Result<(Vec<ChangeRecord>, Vec<ChangeRecord>), GitError> {
    let staged_raw = runner.run(&["diff", "--cached", "--name-status", "-z"])?;
    let unstaged_raw = runner.run(&["diff", "--name-status", "-z"])?;
    let untracked_raw = runner.run(&["ls-files", "--others", "--exclude-standard", "-z"])?;

    let staged = parse_name_status(&staged_raw, Origin::Staged);
    let mut unstaged = parse_name_status(&unstaged_raw, Origin::Unstaged);
    unstaged.extend(parse_untracked(&untracked_raw));

    debug!(
        "Collected {} staged and {} unstaged changes",
        staged.len(),
        unstaged.len()
    );

    Ok((staged, unstaged))
}

/// Collect zero-context diff text for a resolved mode.
///
/// Failures degrade to empty text; the classifier then relies on paths only.
pub fn collect_diff<R: GitRunner + ?Sized>(runner: &R, mode: Mode) -> String {
    match mode {
        Mode::Staged => text_or_empty(runner, &["diff", "--cached", "-U0"]),
        Mode::Unstaged => text_or_empty(runner, &["diff", "-U0"]),
        Mode::All => {
            let unstaged = text_or_empty(runner, &["diff", "-U0"]);
            let staged = text_or_empty(runner, &["diff", "--cached", "-U0"]);
            match (unstaged.is_empty(), staged.is_empty()) {
                (true, _) => staged,
                (_, true) => unstaged,
                _ => format!("{unstaged}\n{staged}"),
            }
        }
        Mode::Auto => String::new(),
    }
}

/// Collect per-file line counts for a resolved mode.
pub fn collect_numstat<R: GitRunner + ?Sized>(runner: &R, mode: Mode) -> Vec<StatRecord> {
    match mode {
        Mode::Staged => parse_numstat(&text_or_empty(runner, &["diff", "--cached", "--numstat"])),
        Mode::Unstaged => parse_numstat(&text_or_empty(runner, &["diff", "--numstat"])),
        Mode::All => {
            let unstaged = parse_numstat(&text_or_empty(runner, &["diff", "--numstat"]));
            let staged = parse_numstat(&text_or_empty(runner, &["diff", "--cached", "--numstat"]));
            combine_stats(&unstaged, &staged)
        }
        Mode::Auto => Vec::new(),
    }
}

fn text_or_empty<R: GitRunner + ?Sized>(runner: &R, args: &[&str]) -> String {
    match runner.run(args) {
        Ok(out) => String::from_utf8_lossy(&out).trim_end_matches('\n').to_string(),
        Err(e) => {
            debug!("git {} failed, continuing without it: {}", args.join(" "), e);
            String::new()
        }
    }
}
