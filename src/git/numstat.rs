//! Per-file line counts from `git diff --numstat`.

use std::collections::BTreeMap;

use tracing::debug;

/// Added/deleted line counts for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRecord {
    pub path: String,
    pub added: u64,
    pub deleted: u64,
    /// Binary files carry no line counts.
    pub binary: bool,
}

impl StatRecord {
    pub fn new(path: impl Into<String>, added: u64, deleted: u64) -> Self {
        Self {
            path: path.into(),
            added,
            deleted,
            binary: false,
        }
    }

    pub fn binary(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            added: 0,
            deleted: 0,
            binary: true,
        }
    }

    /// Fold another record for the same path into this one.
    pub fn absorb(&mut self, other: &StatRecord) {
        self.added = self.added.saturating_add(other.added);
        self.deleted = self.deleted.saturating_add(other.deleted);
        self.binary |= other.binary;
    }
}

/// Parse numstat text into records.
///
/// Blank lines, lines without three tab-separated fields, and lines whose
/// counts are not non-negative integers are skipped.
pub fn parse_numstat(raw: &str) -> Vec<StatRecord> {
    raw.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<StatRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = line.splitn(3, '\t');
    let (Some(added), Some(deleted), Some(path)) = (parts.next(), parts.next(), parts.next())
    else {
        debug!("Skipping numstat line without three fields: {:?}", line);
        return None;
    };

    if added == "-" && deleted == "-" {
        return Some(StatRecord::binary(path));
    }

    match (added.parse::<u64>(), deleted.parse::<u64>()) {
        (Ok(added), Ok(deleted)) => Some(StatRecord::new(path, added, deleted)),
        _ => {
            debug!("Skipping numstat line with bad counts: {:?}", line);
            None
        }
    }
}

/// Combine two stat sources by path, ordered by path.
pub fn combine_stats(first: &[StatRecord], second: &[StatRecord]) -> Vec<StatRecord> {
    let mut by_path: BTreeMap<&str, StatRecord> = BTreeMap::new();

    for stat in first.iter().chain(second) {
        by_path
            .entry(stat.path.as_str())
            .and_modify(|existing| existing.absorb(stat))
            .or_insert_with(|| stat.clone());
    }

    by_path.into_values().collect()
}
