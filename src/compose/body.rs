//! Message body and footers.

use crate::config::{BodyMode, Language, Options};
use crate::git::{ChangeRecord, ChangeStatus, StatRecord};

use super::lexicon::{default_breaking_note, more_items, status_label, summary_sentence};

/// Concrete body mode for `requested`, resolving `Auto` by record count.
pub fn resolve_body_mode(requested: BodyMode, change_count: usize, max_items: usize) -> BodyMode {
    match requested {
        BodyMode::Auto if change_count == 0 => BodyMode::None,
        BodyMode::Auto if change_count <= max_items => BodyMode::Files,
        BodyMode::Auto => BodyMode::Summary,
        other => other,
    }
}

/// Render the body: content lines, then a blank line, then footers.
///
/// `stats` is only consulted in stats mode; an empty slice degrades to the
/// summary line.
pub fn build_body(
    changes: &[ChangeRecord],
    stats: &[StatRecord],
    opts: &Options,
    breaking: bool,
    breaking_note: &str,
) -> String {
    let lang = opts.lang;
    let content = match resolve_body_mode(opts.body, changes.len(), opts.max_items) {
        BodyMode::Files => file_lines(changes, opts.max_items, lang),
        BodyMode::Stats if stats.is_empty() => vec![summary_line(changes, lang)],
        BodyMode::Stats => stat_lines(stats, opts.max_items, lang),
        BodyMode::Summary => vec![summary_line(changes, lang)],
        BodyMode::None | BodyMode::Auto => Vec::new(),
    };

    let mut footers = Vec::new();
    if breaking {
        let note = if breaking_note.is_empty() {
            default_breaking_note(lang)
        } else {
            breaking_note
        };
        footers.push(format!("BREAKING CHANGE: {note}"));
    }
    if !opts.refs.is_empty() {
        footers.push(format!("Refs: {}", opts.refs.join(", ")));
    }
    if !opts.closes.is_empty() {
        footers.push(format!("Closes: {}", opts.closes.join(", ")));
    }

    let mut lines = content;
    if !footers.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(footers);
    }
    lines.join("\n")
}

pub(crate) fn file_lines(changes: &[ChangeRecord], max_items: usize, lang: Language) -> Vec<String> {
    let mut sorted: Vec<&ChangeRecord> = changes.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    capped(&sorted, max_items, lang, |change| {
        let path = match (&change.status, &change.old_path) {
            (ChangeStatus::Renamed, Some(old)) => format!("{old} -> {}", change.path),
            _ => change.path.clone(),
        };
        format!("- {} {path}", status_label(change.status, lang))
    })
}

pub(crate) fn stat_lines(stats: &[StatRecord], max_items: usize, lang: Language) -> Vec<String> {
    let mut sorted: Vec<&StatRecord> = stats.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    capped(&sorted, max_items, lang, |stat| {
        if stat.binary {
            format!("- {} (binary)", stat.path)
        } else {
            format!("- {} (+{} -{})", stat.path, stat.added, stat.deleted)
        }
    })
}

/// Render up to `max_items` entries, then the overflow line if any remain.
fn capped<T>(
    items: &[T],
    max_items: usize,
    lang: Language,
    render: impl Fn(&T) -> String,
) -> Vec<String> {
    let limit = if max_items > 0 {
        items.len().min(max_items)
    } else {
        items.len()
    };
    let mut lines: Vec<String> = items[..limit].iter().map(render).collect();
    if limit < items.len() {
        lines.push(more_items(items.len() - limit, lang));
    }
    lines
}

fn summary_line(changes: &[ChangeRecord], lang: Language) -> String {
    let count = |wanted: &[ChangeStatus]| {
        changes
            .iter()
            .filter(|c| wanted.contains(&c.status))
            .count()
    };
    summary_sentence(
        changes.len(),
        count(&[ChangeStatus::Added, ChangeStatus::Untracked]),
        count(&[ChangeStatus::Deleted]),
        count(&[ChangeStatus::Modified]),
        lang,
    )
}
