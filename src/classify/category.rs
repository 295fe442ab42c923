//! Path categorization as an ordered, first-match rule table.

use std::fmt;
use std::path::Path;

/// Coarse kind of file a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCategory {
    Docs,
    Test,
    Ci,
    Build,
    Chore,
    Code,
}

impl PathCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::Test => "test",
            Self::Ci => "ci",
            Self::Build => "build",
            Self::Chore => "chore",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for PathCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased views of one path that the rules look at.
struct PathFacts<'a> {
    path: &'a str,
    base: &'a str,
    ext: &'a str,
}

type Rule = (PathCategory, fn(&PathFacts<'_>) -> bool);

/// Evaluated top to bottom; the first matching rule wins, `Code` otherwise.
const RULES: &[Rule] = &[
    (PathCategory::Docs, is_doc_file),
    (PathCategory::Docs, is_doc_location),
    (PathCategory::Test, is_test_file),
    (PathCategory::Ci, is_ci_config),
    (PathCategory::Build, is_build_manifest),
    (PathCategory::Build, is_build_dir),
    (PathCategory::Chore, is_tooling_dir),
    (PathCategory::Chore, is_tooling_file),
];

/// Matched against the whole path, so only root-level files qualify.
const DOC_PATH_PREFIXES: &[&str] = &["readme.", "changelog", "license", "contributing"];
const DOC_EXTENSIONS: &[&str] = &["md", "rst", "adoc"];

const TEST_DIRS: &[&str] = &["test", "tests"];
const TEST_NAME_SUFFIXES: &[&str] = &["_test.go", "_test.py", "_spec.rb"];
const TEST_NAME_INFIXES: &[&str] = &[".spec.", ".test."];

const CI_PREFIXES: &[&str] = &[
    ".github/workflows/",
    ".github/actions/",
    ".circleci/",
    ".gitlab-ci",
];
const CI_FILES: &[&str] = &[
    "jenkinsfile",
    "azure-pipelines.yml",
    "appveyor.yml",
    ".travis.yml",
];

const BUILD_FILES: &[&str] = &[
    "makefile",
    "dockerfile",
    "go.mod",
    "go.sum",
    "package.json",
    "package-lock.json",
    "pnpm-lock.yaml",
    "yarn.lock",
    "cargo.toml",
    "cargo.lock",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "settings.gradle",
    "settings.gradle.kts",
    "gradle.properties",
    "cmakelists.txt",
];
const BUILD_DIRS: &[&str] = &["build/", "docker/", "vendor/", "third_party/"];

const TOOLING_DIRS: &[&str] = &["scripts/", "tools/", "config/", ".vscode/"];
const TOOLING_FILES: &[&str] = &[
    ".gitignore",
    ".gitattributes",
    ".editorconfig",
    "tsconfig.json",
    "eslint.config.js",
    ".pre-commit-config.yaml",
    "ruff.toml",
    "rustfmt.toml",
    "clippy.toml",
];
const TOOLING_FILE_PREFIXES: &[&str] = &[".prettierrc", ".eslintrc"];

fn is_doc_file(f: &PathFacts<'_>) -> bool {
    f.path == "readme" || DOC_PATH_PREFIXES.iter().any(|p| f.path.starts_with(p))
}

fn is_doc_location(f: &PathFacts<'_>) -> bool {
    f.path.starts_with("docs/") || DOC_EXTENSIONS.contains(&f.ext)
}

fn is_test_file(f: &PathFacts<'_>) -> bool {
    let mut dirs = f.path.split('/').rev().skip(1);
    dirs.any(|segment| TEST_DIRS.contains(&segment))
        || TEST_NAME_SUFFIXES.iter().any(|s| f.base.ends_with(s))
        || TEST_NAME_INFIXES.iter().any(|s| f.base.contains(s))
        || (f.base.starts_with("test_") && f.ext == "py")
}

fn is_ci_config(f: &PathFacts<'_>) -> bool {
    CI_PREFIXES.iter().any(|p| f.path.starts_with(p)) || CI_FILES.contains(&f.base)
}

fn is_build_manifest(f: &PathFacts<'_>) -> bool {
    BUILD_FILES.contains(&f.base)
}

fn is_build_dir(f: &PathFacts<'_>) -> bool {
    BUILD_DIRS.iter().any(|p| f.path.starts_with(p))
}

fn is_tooling_dir(f: &PathFacts<'_>) -> bool {
    TOOLING_DIRS.iter().any(|p| f.path.starts_with(p))
}

fn is_tooling_file(f: &PathFacts<'_>) -> bool {
    TOOLING_FILES.contains(&f.base) || TOOLING_FILE_PREFIXES.iter().any(|p| f.base.starts_with(p))
}

/// Categorize a repository-relative path.
pub fn categorize_path(path: &str) -> PathCategory {
    let lower = path.to_lowercase();
    let base = base_name(&lower);
    let ext = Path::new(base)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let facts = PathFacts {
        path: &lower,
        base,
        ext,
    };

    RULES
        .iter()
        .find(|(_, matches)| matches(&facts))
        .map(|(category, _)| *category)
        .unwrap_or(PathCategory::Code)
}

/// Last `/`-separated component.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Drop everything from the last `.` on.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// First directory component, or `None` for a path at the repository root.
pub fn top_level(path: &str) -> Option<&str> {
    path.split_once('/').map(|(first, _)| first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docs() {
        for path in ["README.md", "README", "CHANGELOG", "LICENSE-MIT", "docs/setup.txt", "guide/intro.rst", "notes.adoc", "CONTRIBUTING", "pkg/CONTRIBUTING.md"] {
            assert_eq!(categorize_path(path), PathCategory::Docs, "{path}");
        }
    }

    #[test]
    fn test_doc_names_only_match_at_root() {
        for path in ["pkg/license.go", "src/changelog.rs", "lib/readme_renderer.py", "pkg/CONTRIBUTING", "readme_gen.rs"] {
            assert_eq!(categorize_path(path), PathCategory::Code, "{path}");
        }
    }

    #[test]
    fn test_tests() {
        for path in ["tests/integration.rs", "src/test/Main.java", "pkg/server/handler_test.go", "web/app.spec.ts", "web/app.test.js", "test_utils.py"] {
            assert_eq!(categorize_path(path), PathCategory::Test, "{path}");
        }
    }

    #[test]
    fn test_test_segment_must_be_a_directory() {
        assert_eq!(categorize_path("src/tests.rs"), PathCategory::Code);
    }

    #[test]
    fn test_ci() {
        for path in [".github/workflows/ci.yml", ".circleci/config.yml", ".gitlab-ci.yml", "Jenkinsfile"] {
            assert_eq!(categorize_path(path), PathCategory::Ci, "{path}");
        }
    }

    #[test]
    fn test_build() {
        for path in ["Cargo.toml", "crates/core/Cargo.lock", "Dockerfile", "vendor/lib/x.go", "go.sum"] {
            assert_eq!(categorize_path(path), PathCategory::Build, "{path}");
        }
    }

    #[test]
    fn test_chore() {
        for path in [".gitignore", "scripts/release.sh", ".vscode/settings.json", ".eslintrc.json", "rustfmt.toml"] {
            assert_eq!(categorize_path(path), PathCategory::Chore, "{path}");
        }
    }

    #[test]
    fn test_code() {
        for path in ["src/main.rs", "pkg/server/handler.go", "main.go", "lib/index.ts"] {
            assert_eq!(categorize_path(path), PathCategory::Code, "{path}");
        }
    }

    #[test]
    fn test_first_match_wins() {
        // Markdown under tests/ is documentation, not a test.
        assert_eq!(categorize_path("tests/README.md"), PathCategory::Docs);
        // A manifest under scripts/ is a build file.
        assert_eq!(categorize_path("scripts/package.json"), PathCategory::Build);
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(base_name("a/b/c.rs"), "c.rs");
        assert_eq!(base_name("c.rs"), "c.rs");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension(".gitignore"), "");
        assert_eq!(strip_extension("Makefile"), "Makefile");
        assert_eq!(top_level("src/main.rs"), Some("src"));
        assert_eq!(top_level("main.rs"), None);
    }
}
