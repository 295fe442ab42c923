//! Tests for type, scope, and breaking-change classification.

mod common;

use commitgen::classify::{
    CommitType, Overrides, classify, detect_breaking, detect_scope, detect_type,
};
use commitgen::git::ChangeStatus;
use common::staged;

#[test]
fn test_docs_only_change() {
    let changes = vec![staged("docs/guide.md", ChangeStatus::Added)];
    let (commit_type, reasons) = detect_type(&changes, "", None);
    assert_eq!(commit_type, CommitType::Docs);
    assert_eq!(reasons, vec!["only non-code files"]);
}

#[test]
fn test_new_exported_symbol_is_feat() {
    let changes = vec![staged("pkg/server/handler.go", ChangeStatus::Added)];
    let diff = "diff --git a/pkg/server/handler.go b/pkg/server/handler.go\n\
                +++ b/pkg/server/handler.go\n\
                @@ -0,0 +1 @@\n\
                +func NewHandler() {}\n";
    assert_eq!(detect_type(&changes, diff, None).0, CommitType::Feat);
}

#[test]
fn test_removed_exported_symbol_is_breaking() {
    let (breaking, note) = detect_breaking("-func OldAPI() {}\n", false);
    assert!(breaking);
    assert!(note.contains("OldAPI"));
}

#[test]
fn test_reintroduced_symbol_is_not_breaking() {
    let diff = "-func OldAPI() {}\n+func OldAPI(ctx Context) {}\n";
    assert_eq!(detect_breaking(diff, false), (false, String::new()));
}

#[test]
fn test_scope_common_top_level() {
    let changes = vec![
        staged("pkg/a/x.go", ChangeStatus::Modified),
        staged("pkg/b/y.go", ChangeStatus::Modified),
    ];
    assert_eq!(detect_scope(&changes, None), "pkg");
}

#[test]
fn test_scope_disagreement() {
    let changes = vec![
        staged("pkg/x.go", ChangeStatus::Modified),
        staged("cmd/y.go", ChangeStatus::Modified),
    ];
    assert_eq!(detect_scope(&changes, None), "");
}

#[test]
fn test_overrides_take_precedence() {
    let changes = vec![staged("docs/guide.md", ChangeStatus::Added)];
    let overrides = Overrides {
        commit_type: Some(CommitType::Chore),
        scope: Some("Release Notes".to_string()),
        breaking: true,
    };
    let result = classify(&changes, "", &overrides);
    assert_eq!(result.commit_type, CommitType::Chore);
    assert_eq!(result.reasons, vec!["type override"]);
    assert_eq!(result.scope, "release-notes");
    assert!(result.breaking);
    assert!(result.breaking_note.is_empty());
}

#[test]
fn test_ci_and_build_mix_prefers_ci() {
    let changes = vec![
        staged(".github/workflows/release.yml", ChangeStatus::Modified),
        staged("Cargo.lock", ChangeStatus::Modified),
        staged("Cargo.toml", ChangeStatus::Modified),
    ];
    assert_eq!(detect_type(&changes, "", None).0, CommitType::Ci);
}

#[test]
fn test_classification_is_deterministic() {
    let changes = vec![
        staged("src/parser/lex.rs", ChangeStatus::Modified),
        staged("src/parser/ast.rs", ChangeStatus::Added),
        staged("README.md", ChangeStatus::Modified),
    ];
    let diff = "+pub struct Token;\n-pub enum Kind {}\n";
    let first = classify(&changes, diff, &Overrides::default());
    let second = classify(&changes, diff, &Overrides::default());
    assert_eq!(first, second);
    assert_eq!(first.commit_type, CommitType::Feat);
    assert_eq!(first.scope, "");
    assert_eq!(first.breaking_note, "removed exported symbols: Kind");
}
