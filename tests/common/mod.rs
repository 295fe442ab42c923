//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use commitgen::git::{ChangeRecord, ChangeStatus, Origin};

/// Whether a usable `git` binary is on PATH.
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// Build a staged change record.
pub fn staged(path: &str, status: ChangeStatus) -> ChangeRecord {
    ChangeRecord::new(path, status, Origin::Staged)
}

/// Build an unstaged change record.
pub fn unstaged(path: &str, status: ChangeStatus) -> ChangeRecord {
    ChangeRecord::new(path, status, Origin::Unstaged)
}

/// A throwaway git repository driven through the git CLI.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
}

impl TestRepo {
    /// Create a new repository with a committer identity configured.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    pub fn stage(&self, rel: &str) {
        self.git(&["add", "--", rel]);
    }

    /// Stage everything and commit.
    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", message]);
    }
}
