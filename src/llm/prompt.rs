//! Prompt construction and reply cleanup for the chat model.

use crate::classify::ClassificationResult;
use crate::compose::body::{file_lines, stat_lines};
use crate::config::{BodyMode, Format, Mode, Options};
use crate::git::{ChangeRecord, StatRecord};

/// Upper bound on listed files and stats, whatever `max_items` says.
const PROMPT_ITEM_CAP: usize = 20;

/// Longest first fence line still treated as a language tag.
const MAX_FENCE_TAG_LEN: usize = 12;

/// Everything the user prompt describes.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub opts: &'a Options,
    pub mode: Mode,
    pub changes: &'a [ChangeRecord],
    pub stats: &'a [StatRecord],
    pub diff: &'a str,
    pub classification: &'a ClassificationResult,
    /// The locally composed message.
    pub heuristic: &'a str,
}

pub fn default_system_prompt() -> String {
    [
        "You are a commit message generator for git.",
        "Return ONLY the commit message text.",
        "No preface, no analysis, no markdown, no code fences, no surrounding quotes.",
        "Follow the user's formatting and language requirements exactly.",
        "Use only the provided context; do not invent changes.",
    ]
    .join(" ")
}

/// Build the user prompt: requirements, heuristic context, file and stat
/// lists, then the diff truncated to `max_diff` bytes.
pub fn build_user_prompt(ctx: &PromptContext<'_>, max_diff: usize) -> String {
    let mut lines = requirement_lines(ctx.opts, ctx.classification);
    lines.extend(context_lines(ctx));

    let cap = item_cap(ctx.opts.max_items);
    lines.push(String::new());
    lines.push("Changes:".to_string());
    let files = file_lines(ctx.changes, cap, ctx.opts.lang);
    if files.is_empty() {
        lines.push("- (no files)".to_string());
    }
    lines.extend(files);

    if !ctx.stats.is_empty() {
        lines.push(String::new());
        lines.push("Stats:".to_string());
        lines.extend(stat_lines(ctx.stats, cap, ctx.opts.lang));
    }

    let (diff, truncated) = truncate_diff(ctx.diff, max_diff);
    if !diff.trim().is_empty() {
        lines.push(String::new());
        lines.push(if truncated {
            format!("Diff (truncated to {max_diff} bytes):")
        } else {
            "Diff:".to_string()
        });
        lines.push(diff.to_string());
    }

    if let Some(extra) = ctx.opts.llm.as_ref().and_then(|l| l.user.as_deref()) {
        lines.push(String::new());
        lines.push(format!("Extra instructions:\n{extra}"));
    }

    lines.join("\n").trim().to_string()
}

fn requirement_lines(opts: &Options, result: &ClassificationResult) -> Vec<String> {
    let mut lines = vec![
        "Requirements:".to_string(),
        format!("- Language: {}", opts.lang),
        format!("- Format: {}", opts.format),
    ];
    lines.push(if opts.format.has_type_prefix() {
        "- Use format: type(scope)!: subject (scope optional).".to_string()
    } else {
        "- Use a single-line subject without type prefix.".to_string()
    });
    lines.push(format!("- Subject max length: {} characters.", opts.max_subject));
    lines.push(format!("- Body mode: {}.", opts.body));
    lines.push("- For body lists, use '- ' bullet per line.".to_string());
    if opts.body == BodyMode::Auto {
        lines.push(format!(
            "- Auto body: if files <= {}, list files; otherwise provide a one-line summary.",
            opts.max_items
        ));
    }
    if opts.emoji || opts.format == Format::Gitmoji {
        lines.push(
            "- Prepend gitmoji code that matches the type (e.g., :sparkles:, :bug:).".to_string(),
        );
    }
    if !opts.refs.is_empty() {
        lines.push(format!("- Include footer: Refs: {}", opts.refs.join(", ")));
    }
    if !opts.closes.is_empty() {
        lines.push(format!("- Include footer: Closes: {}", opts.closes.join(", ")));
    }
    lines.push(match (result.breaking, result.breaking_note.as_str()) {
        (true, "") => "- Breaking change detected. Add 'BREAKING CHANGE: ...' footer.".to_string(),
        (true, note) => {
            format!("- Breaking change detected ({note}). Add 'BREAKING CHANGE: {note}' footer.")
        }
        (false, _) => {
            "- No breaking change detected; avoid BREAKING CHANGE unless diff clearly requires it."
                .to_string()
        }
    });
    lines
}

fn context_lines(ctx: &PromptContext<'_>) -> Vec<String> {
    let result = ctx.classification;
    let mut lines = vec![
        String::new(),
        "Context:".to_string(),
        format!("- Mode: {}", ctx.mode),
        format!("- Heuristic suggestion: {}", one_line(ctx.heuristic)),
        format!("- Heuristic type: {}", result.commit_type),
    ];
    if !result.scope.is_empty() {
        lines.push(format!("- Heuristic scope: {}", result.scope));
    }
    if !result.reasons.is_empty() {
        lines.push(format!("- Heuristic reasons: {}", result.reasons.join("; ")));
    }
    lines
}

fn item_cap(max_items: usize) -> usize {
    if max_items == 0 {
        PROMPT_ITEM_CAP
    } else {
        max_items.min(PROMPT_ITEM_CAP)
    }
}

/// Cut `diff` to at most `max_bytes`, backing off to a char boundary.
/// Returns whether anything was dropped.
pub fn truncate_diff(diff: &str, max_bytes: usize) -> (&str, bool) {
    if max_bytes == 0 || diff.len() <= max_bytes {
        return (diff, false);
    }
    let mut end = max_bytes;
    while !diff.is_char_boundary(end) {
        end -= 1;
    }
    (&diff[..end], true)
}

/// Strip the wrapping models like to add: a code fence with a short
/// language tag, a `commit message:` or `message:` label, and quotes or
/// backticks.
pub fn clean_message(input: &str) -> String {
    let mut s = input.trim();
    if s.is_empty() {
        return String::new();
    }

    if let Some(rest) = s.strip_prefix("```") {
        s = rest.trim();
        if let Some((first, rest)) = s.split_once('\n') {
            let tag = first.trim();
            if !tag.is_empty() && tag.len() <= MAX_FENCE_TAG_LEN && !tag.contains(' ') {
                s = rest.trim();
            }
        }
        if let Some(end) = s.rfind("```") {
            s = s[..end].trim();
        }
    }

    for label in ["commit message:", "message:"] {
        if s.len() >= label.len()
            && s.is_char_boundary(label.len())
            && s[..label.len()].eq_ignore_ascii_case(label)
        {
            s = s[label.len()..].trim();
        }
    }

    s.trim_matches(|c| c == '"' || c == '`').trim().to_string()
}

fn one_line(s: &str) -> String {
    s.replace('\n', " ").trim().to_string()
}
