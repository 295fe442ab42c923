//! Bilingual wording tables.

use crate::classify::CommitType;
use crate::config::Language;
use crate::git::ChangeStatus;

/// Imperative verb and fallback target noun for a commit type.
pub fn verb_for_type(commit_type: CommitType, lang: Language) -> (&'static str, &'static str) {
    match lang {
        Language::En => match commit_type {
            CommitType::Feat => ("Add", "feature"),
            CommitType::Fix => ("Fix", "bug"),
            CommitType::Docs => ("Update", "docs"),
            CommitType::Test => ("Add", "tests"),
            CommitType::Refactor => ("Refactor", "code"),
            CommitType::Perf => ("Optimize", "performance"),
            CommitType::Style => ("Format", "code"),
            CommitType::Build => ("Update", "build"),
            CommitType::Ci => ("Update", "CI"),
            CommitType::Chore => ("Update", "tooling"),
        },
        Language::Ru => match commit_type {
            CommitType::Feat => ("Добавь", "функциональность"),
            CommitType::Fix => ("Исправь", "ошибки"),
            CommitType::Docs => ("Обнови", "документацию"),
            CommitType::Test => ("Добавь", "тесты"),
            CommitType::Refactor => ("Улучши", "структуру кода"),
            CommitType::Perf => ("Оптимизируй", "производительность"),
            CommitType::Style => ("Приведи", "стиль"),
            CommitType::Build => ("Обнови", "сборку"),
            CommitType::Ci => ("Обнови", "CI"),
            CommitType::Chore => ("Обнови", "инструменты"),
        },
    }
}

/// Last-resort subject target.
pub fn fallback_target(lang: Language) -> &'static str {
    match lang {
        Language::En => "changes",
        Language::Ru => "изменения",
    }
}

/// Gitmoji shortcode for a commit type.
pub fn emoji_code(commit_type: CommitType) -> &'static str {
    match commit_type {
        CommitType::Feat => ":sparkles:",
        CommitType::Fix => ":bug:",
        CommitType::Docs => ":memo:",
        CommitType::Style => ":art:",
        CommitType::Refactor => ":recycle:",
        CommitType::Perf => ":zap:",
        CommitType::Test => ":white_check_mark:",
        CommitType::Build => ":package:",
        CommitType::Ci => ":construction_worker:",
        CommitType::Chore => ":wrench:",
    }
}

/// Reverse lookup for [`emoji_code`].
pub fn type_for_emoji(code: &str) -> Option<CommitType> {
    CommitType::ALL
        .into_iter()
        .find(|ty| emoji_code(*ty) == code)
}

/// Short label shown before each path in a files body.
pub fn status_label(status: ChangeStatus, lang: Language) -> &'static str {
    match (lang, status) {
        (Language::En, ChangeStatus::Added) => "add",
        (Language::En, ChangeStatus::Modified) => "mod",
        (Language::En, ChangeStatus::Deleted) => "del",
        (Language::En, ChangeStatus::Renamed) => "ren",
        (Language::En, ChangeStatus::Copied) => "cpy",
        (Language::En, ChangeStatus::Untracked) => "new",
        (Language::Ru, ChangeStatus::Added) => "добавл",
        (Language::Ru, ChangeStatus::Modified) => "изм",
        (Language::Ru, ChangeStatus::Deleted) => "удал",
        (Language::Ru, ChangeStatus::Renamed) => "переим",
        (Language::Ru, ChangeStatus::Copied) => "коп",
        (Language::Ru, ChangeStatus::Untracked) => "нов",
    }
}

/// Overflow line appended when a list is capped.
pub fn more_items(remaining: usize, lang: Language) -> String {
    match lang {
        Language::En => format!("- and {remaining} more"),
        Language::Ru => format!("- и еще {remaining}"),
    }
}

/// One-line change tally.
pub fn summary_sentence(
    total: usize,
    added: usize,
    removed: usize,
    modified: usize,
    lang: Language,
) -> String {
    match lang {
        Language::En => format!(
            "Files changed: {total} (added {added}, removed {removed}, modified {modified})"
        ),
        Language::Ru => format!(
            "Файлов изменено: {total} (добавлено {added}, удалено {removed}, изменено {modified})"
        ),
    }
}

/// Note used in the breaking footer when detection produced none.
pub fn default_breaking_note(lang: Language) -> &'static str {
    match lang {
        Language::En => "incompatible API changes",
        Language::Ru => "несовместимые изменения API",
    }
}
