//! Diagnostic rendering of a run, written to stderr with `--explain`.

use std::io::{self, Write};

use crate::classify::ClassificationResult;
use crate::config::{Mode, Options};

/// Write the explain lines for one run.
pub fn write_explain<W: Write>(
    w: &mut W,
    opts: &Options,
    mode: Mode,
    change_count: usize,
    result: &ClassificationResult,
    llm_used: bool,
) -> io::Result<()> {
    writeln!(w, "mode: {mode} ({change_count} files)")?;
    writeln!(w, "type: {}", result.commit_type)?;
    if !result.reasons.is_empty() {
        writeln!(w, "reasons: {}", result.reasons.join("; "))?;
    }
    if !result.scope.is_empty() {
        writeln!(w, "scope: {}", result.scope)?;
    }
    writeln!(w, "breaking: {}", result.breaking)?;
    writeln!(w, "llm: {llm_used}")?;
    writeln!(w, "format: {}", opts.format)?;
    writeln!(w, "body: {}", opts.body)?;
    writeln!(w, "lang: {}", opts.lang)
}
