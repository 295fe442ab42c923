//! Copy text to the system clipboard through whichever helper is installed.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::ClipboardError;

/// Helpers tried in order, with their arguments.
pub const CANDIDATES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Pipe `text` into the first clipboard helper found on PATH.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let (name, args) = find_command(|name| which::which(name).is_ok())
        .ok_or(ClipboardError::NoCommand)?;
    debug!("Copying message with {}", name);
    pipe_to(name, args, text)
}

/// First candidate accepted by `available`.
pub fn find_command(
    available: impl Fn(&str) -> bool,
) -> Option<(&'static str, &'static [&'static str])> {
    CANDIDATES
        .iter()
        .copied()
        .find(|(name, _)| available(name))
}

fn pipe_to(name: &str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
    let spawn_failed = |source| ClipboardError::SpawnFailed {
        command: name.to_string(),
        source,
    };

    let mut child = Command::new(name)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(spawn_failed)?;

    // stdin is dropped at the end of the match so the helper sees EOF.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    let status = child.wait().map_err(spawn_failed)?;
    if !status.success() {
        return Err(ClipboardError::NonZeroExit {
            command: name.to_string(),
            code: status.code().unwrap_or(-1),
        });
    }
    written.map_err(spawn_failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        assert_eq!(find_command(|_| true).map(|(n, _)| n), Some("pbcopy"));
        assert_eq!(
            find_command(|n| n.starts_with('x')),
            Some(("xclip", &["-selection", "clipboard"][..]))
        );
        assert_eq!(find_command(|_| false), None);
    }

    #[test]
    fn test_pipe_to_missing_binary() {
        let err = pipe_to("commitgen-no-such-clipboard", &[], "x").unwrap_err();
        assert!(matches!(err, ClipboardError::SpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_reads_all_input() {
        pipe_to("sh", &["-c", "cat > /dev/null"], "feat: add x").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_reports_exit_after_failed_write() {
        let text = "x".repeat(1 << 20);
        let err = pipe_to("sh", &["-c", "exit 3"], &text).unwrap_err();
        assert!(matches!(err, ClipboardError::NonZeroExit { code: 3, .. }));
    }
}
