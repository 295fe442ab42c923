//! Line-level scans over zero-context unified diff text.
//!
//! Only content lines count: a line must start with `+` or `-` and must not
//! be a header (`+++`, `---`, `@@`, `diff `, `index `).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex_lite::Regex;

/// `func Name`, `func (r *T) Name`, `type Name`, `var Name`, `const Name`.
static GO_EXPORTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:func\s+(?:\([^)]+\)\s+)?|type\s+|var\s+|const\s+)([A-Z][A-Za-z0-9_]*)")
        .expect("valid go export pattern")
});

/// `export [default] function|class|const|let|var|interface|type Name`.
static ES_EXPORTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^export\s+(?:default\s+)?(?:function|class|const|let|var|interface|type)\s+([A-Z][A-Za-z0-9_]*)",
    )
    .expect("valid es module export pattern")
});

/// `[pub] fn|struct|enum|trait Name`.
static RUST_EXPORTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:pub\s+)?(?:fn|struct|enum|trait)\s+([A-Z][A-Za-z0-9_]*)")
        .expect("valid rust export pattern")
});

const HEADER_PREFIXES: &[&str] = &["+++", "---", "@@", "diff ", "index "];

/// Whether a diff line is file/hunk metadata rather than content.
pub fn is_diff_header(line: &str) -> bool {
    HEADER_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Content of every qualifying line whose marker is in `markers`, with the
/// marker stripped and surrounding whitespace trimmed.
fn content_lines<'a>(diff: &'a str, markers: &'a [char]) -> impl Iterator<Item = &'a str> {
    diff.lines().filter_map(move |line| {
        let marker = line.chars().next()?;
        if !markers.contains(&marker) || is_diff_header(line) {
            return None;
        }
        Some(line[marker.len_utf8()..].trim())
    })
}

/// Case-insensitive substring search over added and removed lines.
pub fn diff_has_keyword(diff: &str, keywords: &[&str]) -> bool {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    content_lines(diff, &['+', '-']).any(|content| {
        let content = content.to_lowercase();
        keywords.iter().any(|k| content.contains(k.as_str()))
    })
}

/// Names of exported declarations on lines carrying `marker`, sorted and
/// deduplicated.
pub fn exported_names(diff: &str, marker: char) -> Vec<String> {
    let markers = [marker];
    let names: BTreeSet<String> = content_lines(diff, &markers)
        .filter_map(exported_name)
        .collect();
    names.into_iter().collect()
}

/// Exported names that disappear: removed and not re-added anywhere.
pub fn removed_exported_names(diff: &str) -> Vec<String> {
    let added: BTreeSet<String> = exported_names(diff, '+').into_iter().collect();
    exported_names(diff, '-')
        .into_iter()
        .filter(|name| !added.contains(name))
        .collect()
}

fn exported_name(content: &str) -> Option<String> {
    [&*GO_EXPORTED, &*ES_EXPORTED, &*RUST_EXPORTED]
        .iter()
        .find_map(|re| re.captures(content))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
