//! Message composition: subject, body, and header formatting.

pub mod body;
pub mod format;
pub mod lexicon;
pub mod subject;

pub use body::{build_body, resolve_body_mode};
pub use format::{
    HeaderStyle, ParsedHeader, RenderedMessage, format_message, lower_first, parse_header,
    trim_subject,
};
pub use lexicon::{emoji_code, status_label, verb_for_type};
pub use subject::{build_subject, infer_target, primary_area};

use crate::classify::ClassificationResult;
use crate::config::Options;
use crate::git::{ChangeRecord, StatRecord};

/// Compose the full message for a classified change set.
pub fn compose(
    result: &ClassificationResult,
    changes: &[ChangeRecord],
    stats: &[StatRecord],
    opts: &Options,
) -> RenderedMessage {
    let subject = build_subject(result.commit_type, &result.scope, changes, opts.lang);
    let body = build_body(changes, stats, opts, result.breaking, &result.breaking_note);

    format_message(
        result.commit_type,
        &result.scope,
        &subject,
        &body,
        result.breaking,
        HeaderStyle {
            format: opts.format,
            emoji: opts.emoji,
            max_subject: opts.max_subject,
        },
    )
}
