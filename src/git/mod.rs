//! Change extraction from git's machine-readable output.

pub mod command;
pub mod numstat;
pub mod status;

pub use command::{
    GitRunner, SystemGit, collect_changes, collect_diff, collect_numstat, ensure_git,
    ensure_repository,
};
pub use numstat::{StatRecord, combine_stats, parse_numstat};
pub use status::{
    ChangeRecord, ChangeStatus, Origin, merge_changes, parse_name_status, parse_untracked,
    select_changes,
};
