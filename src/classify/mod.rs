//! Rule-based commit classification.
//!
//! Paths are sorted into coarse categories first; the diff text then
//! supplies keyword and exported-symbol signals.

pub mod category;
pub mod detect;
pub mod scan;
pub mod types;

pub use category::{PathCategory, base_name, categorize_path, strip_extension, top_level};
pub use detect::{classify, detect_breaking, detect_scope, detect_type, sanitize_scope, scope_from_path};
pub use scan::{diff_has_keyword, exported_names, removed_exported_names};
pub use types::{ClassificationResult, CommitType, Overrides};
