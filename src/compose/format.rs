//! Final message assembly and header parsing.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::classify::CommitType;
use crate::config::Format;

use super::lexicon::{emoji_code, type_for_emoji};

/// `[:emoji: ]type[(scope)][!]: `
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?::([a-z0-9_+-]+):\s+)?(\w+)(?:\(([^)]+)\))?(!)?\s*:\s*")
        .expect("valid commit header pattern")
});

/// Header settings for one message.
#[derive(Debug, Clone, Copy)]
pub struct HeaderStyle {
    pub format: Format,
    pub emoji: bool,
    /// Zero disables truncation.
    pub max_subject: usize,
}

/// A composed commit message and its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// Subject after casing and truncation, without the prefix.
    pub subject: String,
    pub body: String,
    /// Full text: prefix, subject, and body.
    pub message: String,
}

/// Type, scope, and breaking flag recovered from a message header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub breaking: bool,
    /// Type named by a leading emoji shortcode, when present.
    pub emoji_type: Option<CommitType>,
}

/// Build the final message from a classified subject and body.
pub fn format_message(
    commit_type: CommitType,
    scope: &str,
    subject: &str,
    body: &str,
    breaking: bool,
    style: HeaderStyle,
) -> RenderedMessage {
    let prefixed = style.format.has_type_prefix();

    let subject = if prefixed {
        lower_first(subject)
    } else {
        subject.to_string()
    };
    let subject = trim_subject(&subject, style.max_subject);

    let mut prefix = String::new();
    if prefixed {
        prefix.push_str(commit_type.as_str());
        if !scope.is_empty() {
            prefix.push('(');
            prefix.push_str(scope);
            prefix.push(')');
        }
        if breaking {
            prefix.push('!');
        }
        prefix.push_str(": ");
    }
    if style.emoji || style.format == Format::Gitmoji {
        prefix = format!("{} {prefix}", emoji_code(commit_type));
    }

    let mut message = format!("{prefix}{subject}");
    if !body.is_empty() {
        message.push_str("\n\n");
        message.push_str(body);
    }

    RenderedMessage {
        subject,
        body: body.to_string(),
        message,
    }
}

/// Lowercase the first character only.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut `subject` to at most `max` characters, preferring a word boundary.
///
/// Backtracks to the last space inside the cut; a boundary closer than three
/// characters to the start is ignored in favour of the hard cut.
pub fn trim_subject(subject: &str, max: usize) -> String {
    if max == 0 || subject.chars().count() <= max {
        return subject.to_string();
    }

    let chars: Vec<char> = subject.chars().take(max).collect();
    let cut = match chars.iter().rposition(|c| *c == ' ') {
        Some(idx) if idx >= 3 => idx,
        _ => max,
    };
    chars[..cut].iter().collect::<String>().trim().to_string()
}

/// Parse the header of a conventional or gitmoji message.
///
/// Returns `None` for plain messages or an unknown type.
pub fn parse_header(message: &str) -> Option<ParsedHeader> {
    let first_line = message.lines().next().unwrap_or_default();
    let caps = HEADER.captures(first_line)?;

    let commit_type = caps.get(2)?.as_str().parse::<CommitType>().ok()?;
    let emoji_type = caps
        .get(1)
        .and_then(|m| type_for_emoji(&format!(":{}:", m.as_str())));

    Some(ParsedHeader {
        commit_type,
        scope: caps.get(3).map(|m| m.as_str().to_string()),
        breaking: caps.get(4).is_some(),
        emoji_type,
    })
}
