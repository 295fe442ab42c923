//! Subject line construction.

use std::collections::HashMap;

use crate::classify::{CommitType, base_name, strip_extension};
use crate::config::Language;
use crate::git::ChangeRecord;

use super::lexicon::{fallback_target, verb_for_type};

/// Directories whose children name the real area of a change.
const CONTAINER_DIRS: &[&str] = &["cmd", "pkg", "internal", "src", "lib", "app"];

/// The area a path belongs to: `src/parser` for `src/parser/lex.rs`,
/// `web` for `web/index.ts`, `main` for `main.go`.
pub fn primary_area(path: &str) -> String {
    let mut parts = path.split('/');
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        None => strip_extension(base_name(path)).to_string(),
        Some(second) if CONTAINER_DIRS.contains(&first) => format!("{first}/{second}"),
        Some(_) => first.to_string(),
    }
}

/// Noun phrase the subject talks about, or `None` when nothing stands out.
///
/// Several changes resolve to the scope if given, else to the area held by a
/// strict majority of them. A tie yields nothing.
pub fn infer_target(changes: &[ChangeRecord], scope: &str) -> Option<String> {
    if let [single] = changes {
        return Some(primary_area(&single.path)).filter(|a| !a.is_empty());
    }
    if !scope.is_empty() {
        return Some(scope.to_string());
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for change in changes {
        let area = primary_area(&change.path);
        if !area.is_empty() {
            *counts.entry(area).or_default() += 1;
        }
    }

    let best = counts.values().copied().max()?;
    let mut leaders = counts.into_iter().filter(|(_, count)| *count == best);
    let (area, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(area)
}

/// `verb + " " + target`, using the lexicon's defaults when nothing is
/// inferred.
pub fn build_subject(
    commit_type: CommitType,
    scope: &str,
    changes: &[ChangeRecord],
    lang: Language,
) -> String {
    let (verb, default_target) = verb_for_type(commit_type, lang);
    let target = infer_target(changes, scope)
        .or_else(|| Some(default_target.to_string()).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| fallback_target(lang).to_string());
    format!("{verb} {target}").trim().to_string()
}
