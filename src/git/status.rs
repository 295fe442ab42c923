//! Change extraction from NUL-delimited `git diff --name-status -z` output.
//!
//! git emits a name-status record in one of two physical shapes:
//!
//! ```text
//! M<TAB>path\0                    R100<TAB>old\0new\0      (joined)
//! M\0path\0                       R100\0old\0new\0          (bare)
//! ```
//!
//! The decoder resolves the shape of every status field on its own, so a
//! stream mixing both shapes still parses. Malformed input never errors:
//! a truncated trailing record ends the walk and whatever was decoded so far
//! is returned.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::config::Mode;

/// Status of a changed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    Untracked,
}

impl ChangeStatus {
    /// Map a git status letter to a status.
    ///
    /// Letters outside the known set (type change, unmerged, unknown) are
    /// reported as modifications.
    pub fn from_code(code: char) -> Self {
        match code {
            'A' => Self::Added,
            'D' => Self::Deleted,
            'R' => Self::Renamed,
            'C' => Self::Copied,
            _ => Self::Modified,
        }
    }

    /// Single-letter wire form. Untracked files use `?` like `git status`.
    pub fn code(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Copied => 'C',
            Self::Untracked => '?',
        }
    }

    /// Whether records with this status carry an old path.
    pub fn has_old_path(&self) -> bool {
        matches!(self, Self::Renamed | Self::Copied)
    }

    /// Whether the path did not exist before this change.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Added | Self::Untracked | Self::Copied)
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "Added"),
            Self::Modified => write!(f, "Modified"),
            Self::Deleted => write!(f, "Deleted"),
            Self::Renamed => write!(f, "Renamed"),
            Self::Copied => write!(f, "Copied"),
            Self::Untracked => write!(f, "Untracked"),
        }
    }
}

/// Which view of the working tree produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Staged,
    Unstaged,
    Merged,
}

/// One changed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: String,
    /// Source path; `Some` exactly for renames and copies.
    pub old_path: Option<String>,
    pub status: ChangeStatus,
    pub origin: Origin,
}

impl ChangeRecord {
    pub fn new(path: impl Into<String>, status: ChangeStatus, origin: Origin) -> Self {
        Self {
            path: path.into(),
            old_path: None,
            status,
            origin,
        }
    }

    pub fn renamed(
        old_path: impl Into<String>,
        path: impl Into<String>,
        status: ChangeStatus,
        origin: Origin,
    ) -> Self {
        Self {
            path: path.into(),
            old_path: Some(old_path.into()),
            status,
            origin,
        }
    }
}

/// Physical shape of a status field, resolved per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldShape<'a> {
    /// `status<TAB>path` in a single field.
    Joined { status: &'a str, path: &'a str },
    /// `status` alone; paths follow as separate fields.
    Bare { status: &'a str },
}

impl<'a> FieldShape<'a> {
    fn of(field: &'a str) -> Self {
        match field.split_once('\t') {
            Some((status, path)) => FieldShape::Joined { status, path },
            None => FieldShape::Bare { status: field },
        }
    }

    fn status(&self) -> &'a str {
        match *self {
            FieldShape::Joined { status, .. } | FieldShape::Bare { status } => status,
        }
    }
}

/// Parse a NUL-delimited name-status stream.
pub fn parse_name_status(data: &[u8], origin: Origin) -> Vec<ChangeRecord> {
    let fields: Vec<Cow<'_, str>> = data
        .split(|&b| b == 0)
        .map(String::from_utf8_lossy)
        .collect();

    let mut out = Vec::new();
    let mut i = 0;

    while i < fields.len() {
        let field: &str = &fields[i];
        if field.is_empty() {
            i += 1;
            continue;
        }

        let shape = FieldShape::of(field);
        // Similarity scores such as the `100` in `R100` are ignored.
        let Some(code) = shape.status().chars().next() else {
            debug!("Skipping name-status field without a status letter: {:?}", field);
            i += 1;
            continue;
        };
        let status = ChangeStatus::from_code(code);

        match (shape, status.has_old_path()) {
            (FieldShape::Joined { path: old_path, .. }, true) => {
                let Some(new_path) = fields.get(i + 1) else {
                    debug!("Truncated {} record for {}, stopping", status, old_path);
                    break;
                };
                push_pair(&mut out, old_path, new_path, status, origin);
                i += 2;
            }
            (FieldShape::Joined { path, .. }, false) => {
                push_single(&mut out, path, status, origin);
                i += 1;
            }
            (FieldShape::Bare { .. }, true) => {
                if i + 2 >= fields.len() {
                    debug!("Truncated {} record at field {}, stopping", status, i);
                    break;
                }
                push_pair(&mut out, &fields[i + 1], &fields[i + 2], status, origin);
                i += 3;
            }
            (FieldShape::Bare { .. }, false) => {
                let Some(path) = fields.get(i + 1) else {
                    debug!("Status {:?} without a path, stopping", field);
                    break;
                };
                push_single(&mut out, path, status, origin);
                i += 2;
            }
        }
    }

    out
}

fn push_single(out: &mut Vec<ChangeRecord>, path: &str, status: ChangeStatus, origin: Origin) {
    if !path.is_empty() {
        out.push(ChangeRecord::new(path, status, origin));
    }
}

fn push_pair(
    out: &mut Vec<ChangeRecord>,
    old_path: &str,
    new_path: &str,
    status: ChangeStatus,
    origin: Origin,
) {
    if !old_path.is_empty() && !new_path.is_empty() {
        out.push(ChangeRecord::renamed(old_path, new_path, status, origin));
    }
}

/// Parse a NUL-delimited untracked listing (`git ls-files --others -z`).
pub fn parse_untracked(data: &[u8]) -> Vec<ChangeRecord> {
    data.split(|&b| b == 0)
        .map(String::from_utf8_lossy)
        .filter_map(|field| {
            let path = field.trim();
            (!path.is_empty())
                .then(|| ChangeRecord::new(path, ChangeStatus::Untracked, Origin::Unstaged))
        })
        .collect()
}

/// Merge staged and unstaged records by path.
///
/// Every resulting record has origin [`Origin::Merged`]. When a path appears
/// in both views the staged status is kept. Output is ordered by path.
pub fn merge_changes(staged: &[ChangeRecord], unstaged: &[ChangeRecord]) -> Vec<ChangeRecord> {
    let mut by_path: BTreeMap<&str, ChangeRecord> = BTreeMap::new();

    for change in staged {
        by_path.insert(change.path.as_str(), change.clone());
    }

    for change in unstaged {
        by_path
            .entry(change.path.as_str())
            .or_insert_with(|| change.clone());
    }

    by_path
        .into_values()
        .map(|mut change| {
            change.origin = Origin::Merged;
            change
        })
        .collect()
}

/// Resolve the effective mode and pick the matching records.
///
/// `Auto` prefers staged changes and falls back to unstaged ones (which
/// already include untracked files).
pub fn select_changes(
    mode: Mode,
    staged: Vec<ChangeRecord>,
    unstaged: Vec<ChangeRecord>,
) -> (Mode, Vec<ChangeRecord>) {
    match mode {
        Mode::Staged => (Mode::Staged, staged),
        Mode::Unstaged => (Mode::Unstaged, unstaged),
        Mode::All => (Mode::All, merge_changes(&staged, &unstaged)),
        Mode::Auto if !staged.is_empty() => (Mode::Staged, staged),
        Mode::Auto => (Mode::Unstaged, unstaged),
    }
}
