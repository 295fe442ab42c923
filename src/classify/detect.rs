//! Commit type, scope, and breaking-change detection.
//!
//! Pure functions of the change records, the diff text, and the caller's
//! overrides. Type detection is an ordered policy where the first applicable
//! signal wins.

use std::collections::HashMap;

use crate::git::ChangeRecord;

use super::category::{PathCategory, base_name, categorize_path, strip_extension, top_level};
use super::scan::{diff_has_keyword, exported_names, removed_exported_names};
use super::types::{ClassificationResult, CommitType, Overrides};

const PERF_PATH_HINTS: &[&str] = &["perf", "optimiz"];
const PERF_DIFF_HINTS: &[&str] = &["perf", "optimiz", "speed"];
const REFACTOR_HINTS: &[&str] = &["refactor", "cleanup", "restructure"];
const STYLE_HINTS: &[&str] = &["lint", "format", "style"];
const BREAKING_HINTS: &[&str] = &["breaking change", "breaking-change"];

/// Non-code categories in priority order, with the type each maps to.
const NON_CODE_PRIORITY: &[(PathCategory, CommitType)] = &[
    (PathCategory::Docs, CommitType::Docs),
    (PathCategory::Test, CommitType::Test),
    (PathCategory::Ci, CommitType::Ci),
    (PathCategory::Build, CommitType::Build),
    (PathCategory::Chore, CommitType::Chore),
];

/// Run type, scope, and breaking detection together.
pub fn classify(changes: &[ChangeRecord], diff: &str, overrides: &Overrides) -> ClassificationResult {
    let (commit_type, reasons) = detect_type(changes, diff, overrides.commit_type);
    let scope = detect_scope(changes, overrides.scope.as_deref());
    let (breaking, breaking_note) = detect_breaking(diff, overrides.breaking);

    ClassificationResult {
        commit_type,
        reasons,
        scope,
        breaking,
        breaking_note,
    }
}

/// Infer the commit type and the reasons behind it.
pub fn detect_type(
    changes: &[ChangeRecord],
    diff: &str,
    forced: Option<CommitType>,
) -> (CommitType, Vec<String>) {
    if let Some(commit_type) = forced {
        return (commit_type, vec!["type override".to_string()]);
    }

    let mut counts: HashMap<PathCategory, usize> = HashMap::new();
    let mut new_code_file = false;
    for change in changes {
        let category = categorize_path(&change.path);
        *counts.entry(category).or_default() += 1;
        if category == PathCategory::Code && change.status.is_new() {
            new_code_file = true;
        }
    }

    let path_hint = |hints: &[&str]| {
        changes.iter().any(|c| {
            let lower = c.path.to_lowercase();
            hints.iter().any(|h| lower.contains(h))
        })
    };

    let (commit_type, reason) = if counts.get(&PathCategory::Code).copied().unwrap_or(0) == 0 {
        (dominant_non_code(&counts), "only non-code files")
    } else if path_hint(PERF_PATH_HINTS) || diff_has_keyword(diff, PERF_DIFF_HINTS) {
        (CommitType::Perf, "performance hints")
    } else if path_hint(REFACTOR_HINTS) || diff_has_keyword(diff, REFACTOR_HINTS) {
        (CommitType::Refactor, "refactor hints")
    } else if path_hint(STYLE_HINTS) || diff_has_keyword(diff, STYLE_HINTS) {
        (CommitType::Style, "style hints")
    } else if new_code_file || !exported_names(diff, '+').is_empty() {
        (CommitType::Feat, "new code or exported symbols")
    } else {
        (CommitType::Fix, "defaulted to fix")
    };

    (commit_type, vec![reason.to_string()])
}

/// First non-code category, in priority order, that has any files.
fn dominant_non_code(counts: &HashMap<PathCategory, usize>) -> CommitType {
    NON_CODE_PRIORITY
        .iter()
        .find(|(category, _)| counts.get(category).copied().unwrap_or(0) > 0)
        .map(|(_, commit_type)| *commit_type)
        .unwrap_or(CommitType::Chore)
}

/// Decide whether the change breaks compatibility, with an optional note.
pub fn detect_breaking(diff: &str, forced: bool) -> (bool, String) {
    if forced || diff_has_keyword(diff, BREAKING_HINTS) {
        return (true, String::new());
    }

    let removed = removed_exported_names(diff);
    if removed.is_empty() {
        return (false, String::new());
    }

    (
        true,
        format!("removed exported symbols: {}", removed.join(", ")),
    )
}

/// Pick a scope: the override, the single path's area, or the common
/// top-level directory. Disagreement yields no scope.
pub fn detect_scope(changes: &[ChangeRecord], forced: Option<&str>) -> String {
    if let Some(scope) = forced.filter(|s| !s.trim().is_empty()) {
        return sanitize_scope(scope);
    }

    match changes {
        [] => String::new(),
        [single] => sanitize_scope(scope_from_path(&single.path)),
        [first, rest @ ..] => {
            let Some(common) = top_level(&first.path) else {
                return String::new();
            };
            if rest.iter().all(|c| top_level(&c.path) == Some(common)) {
                sanitize_scope(common)
            } else {
                String::new()
            }
        }
    }
}

/// Top-level directory, or the file name without extension at the root.
pub fn scope_from_path(path: &str) -> &str {
    top_level(path).unwrap_or_else(|| strip_extension(base_name(path)))
}

/// Lowercase, spaces to hyphens, keep only `[a-z0-9-_/]`.
pub fn sanitize_scope(scope: &str) -> String {
    scope
        .trim()
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '/'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{ChangeStatus, Origin};

    fn change(path: &str, status: ChangeStatus) -> ChangeRecord {
        ChangeRecord::new(path, status, Origin::Staged)
    }

    #[test]
    fn test_override_wins() {
        let changes = vec![change("docs/guide.md", ChangeStatus::Added)];
        let (ty, reasons) = detect_type(&changes, "", Some(CommitType::Perf));
        assert_eq!(ty, CommitType::Perf);
        assert_eq!(reasons, vec!["type override"]);
    }

    #[test]
    fn test_docs_only() {
        let changes = vec![change("docs/guide.md", ChangeStatus::Added)];
        let (ty, reasons) = detect_type(&changes, "", None);
        assert_eq!(ty, CommitType::Docs);
        assert_eq!(reasons, vec!["only non-code files"]);
    }

    #[test]
    fn test_non_code_priority_order() {
        let changes = vec![
            change("Cargo.toml", ChangeStatus::Modified),
            change(".github/workflows/ci.yml", ChangeStatus::Modified),
            change("tests/a.rs", ChangeStatus::Modified),
            change("tests/b.rs", ChangeStatus::Modified),
        ];
        let (ty, _) = detect_type(&changes, "", None);
        assert_eq!(ty, CommitType::Test);

        let changes = vec![
            change("Cargo.toml", ChangeStatus::Modified),
            change(".gitignore", ChangeStatus::Modified),
        ];
        let (ty, _) = detect_type(&changes, "", None);
        assert_eq!(ty, CommitType::Build);
    }

    #[test]
    fn test_empty_changes_default_to_chore() {
        let (ty, _) = detect_type(&[], "", None);
        assert_eq!(ty, CommitType::Chore);
    }

    #[test]
    fn test_perf_from_path_and_diff() {
        let changes = vec![change("src/perf/cache.rs", ChangeStatus::Modified)];
        assert_eq!(detect_type(&changes, "", None).0, CommitType::Perf);

        let changes = vec![change("src/cache.rs", ChangeStatus::Modified)];
        let diff = "+// speed up lookups\n";
        assert_eq!(detect_type(&changes, diff, None).0, CommitType::Perf);
    }

    #[test]
    fn test_perf_beats_refactor() {
        let changes = vec![change("src/cache.rs", ChangeStatus::Modified)];
        let diff = "+// refactor to optimize\n";
        assert_eq!(detect_type(&changes, diff, None).0, CommitType::Perf);
    }

    #[test]
    fn test_refactor_and_style() {
        let changes = vec![change("src/cleanup.rs", ChangeStatus::Modified)];
        assert_eq!(detect_type(&changes, "", None).0, CommitType::Refactor);

        let changes = vec![change("src/app.rs", ChangeStatus::Modified)];
        assert_eq!(
            detect_type(&changes, "-x\n+# restructure module\n", None).0,
            CommitType::Refactor
        );
        assert_eq!(
            detect_type(&changes, "+// run the formatter\n", None).0,
            CommitType::Style
        );
    }

    #[test]
    fn test_feat_from_new_file() {
        let changes = vec![change("pkg/server/handler.go", ChangeStatus::Added)];
        let (ty, reasons) = detect_type(&changes, "", None);
        assert_eq!(ty, CommitType::Feat);
        assert_eq!(reasons, vec!["new code or exported symbols"]);
    }

    #[test]
    fn test_feat_from_exported_symbol() {
        let changes = vec![change("pkg/server/handler.go", ChangeStatus::Modified)];
        let diff = "+func NewHandler() {}\n";
        assert_eq!(detect_type(&changes, diff, None).0, CommitType::Feat);
    }

    #[test]
    fn test_code_file_named_like_a_doc_is_feat() {
        let changes = vec![change("pkg/license.go", ChangeStatus::Added)];
        let (ty, reasons) = detect_type(&changes, "+func NewLicense() {}\n", None);
        assert_eq!(ty, CommitType::Feat);
        assert_eq!(reasons, vec!["new code or exported symbols"]);
    }

    #[test]
    fn test_new_non_code_file_is_not_feat() {
        let changes = vec![
            change("src/app.rs", ChangeStatus::Modified),
            change("README.md", ChangeStatus::Added),
        ];
        assert_eq!(detect_type(&changes, "", None).0, CommitType::Fix);
    }

    #[test]
    fn test_default_fix() {
        let changes = vec![change("src/app.rs", ChangeStatus::Modified)];
        let (ty, reasons) = detect_type(&changes, "-a\n+b\n", None);
        assert_eq!(ty, CommitType::Fix);
        assert_eq!(reasons, vec!["defaulted to fix"]);
    }

    #[test]
    fn test_breaking_override() {
        assert_eq!(detect_breaking("", true), (true, String::new()));
    }

    #[test]
    fn test_breaking_keyword() {
        assert_eq!(
            detect_breaking("+// BREAKING CHANGE: config moved\n", false),
            (true, String::new())
        );
        assert_eq!(detect_breaking("-breaking-change marker\n", false), (true, String::new()));
    }

    #[test]
    fn test_breaking_from_removed_symbol() {
        let (breaking, note) = detect_breaking("-func OldAPI() {}\n", false);
        assert!(breaking);
        assert!(note.contains("OldAPI"));
        assert_eq!(note, "removed exported symbols: OldAPI");
    }

    #[test]
    fn test_breaking_note_is_sorted() {
        let diff = "-type Zeta struct{}\n-func Alpha() {}\n";
        assert_eq!(
            detect_breaking(diff, false).1,
            "removed exported symbols: Alpha, Zeta"
        );
    }

    #[test]
    fn test_not_breaking() {
        assert_eq!(detect_breaking("+func Added() {}\n", false), (false, String::new()));
    }

    #[test]
    fn test_scope_override_is_sanitized() {
        let changes = vec![change("src/a.rs", ChangeStatus::Modified)];
        assert_eq!(detect_scope(&changes, Some("My Scope!")), "my-scope");
    }

    #[test]
    fn test_scope_single_change() {
        assert_eq!(detect_scope(&[change("pkg/a/x.go", ChangeStatus::Modified)], None), "pkg");
        assert_eq!(detect_scope(&[change("Main.go", ChangeStatus::Modified)], None), "main");
    }

    #[test]
    fn test_scope_common_top_level() {
        let changes = vec![
            change("pkg/a/x.go", ChangeStatus::Modified),
            change("pkg/b/y.go", ChangeStatus::Modified),
        ];
        assert_eq!(detect_scope(&changes, None), "pkg");
    }

    #[test]
    fn test_scope_disagreement_is_empty() {
        let changes = vec![
            change("pkg/x.go", ChangeStatus::Modified),
            change("cmd/y.go", ChangeStatus::Modified),
        ];
        assert_eq!(detect_scope(&changes, None), "");

        let changes = vec![
            change("pkg/x.go", ChangeStatus::Modified),
            change("main.go", ChangeStatus::Modified),
        ];
        assert_eq!(detect_scope(&changes, None), "");
    }

    #[test]
    fn test_sanitize_scope() {
        assert_eq!(sanitize_scope(" Auth/OAuth "), "auth/oauth");
        assert_eq!(sanitize_scope("db layer_2"), "db-layer_2");
        assert_eq!(sanitize_scope("ünïcode"), "ncode");
    }

    #[test]
    fn test_classify_combines_verdicts() {
        let changes = vec![change("pkg/server/handler.go", ChangeStatus::Modified)];
        let diff = "-func OldAPI() {}\n+func NewAPI() {}\n";
        let result = classify(&changes, diff, &Overrides::default());
        assert_eq!(result.commit_type, CommitType::Feat);
        assert_eq!(result.scope, "pkg");
        assert!(result.breaking);
        assert_eq!(result.breaking_note, "removed exported symbols: OldAPI");
    }
}
