//! End-to-end generation: collect, classify, compose, then optionally ask a
//! model to rewrite the draft.

use tracing::{debug, warn};

use crate::classify::{ClassificationResult, Overrides, classify};
use crate::compose::{RenderedMessage, compose, resolve_body_mode};
use crate::config::{BodyMode, Mode, Options};
use crate::error::GenerateError;
use crate::git::{
    ChangeRecord, GitRunner, StatRecord, collect_changes, collect_diff, collect_numstat,
    ensure_repository, select_changes,
};
use crate::llm::{ChatTransport, PromptContext, generate_message};

/// Raw inputs gathered from the repository for one run.
#[derive(Debug, Clone)]
pub struct Collected {
    /// Mode actually used, never `Auto`.
    pub mode: Mode,
    pub changes: Vec<ChangeRecord>,
    pub diff: String,
    /// Empty unless a stats body or the model prompt needs them.
    pub stats: Vec<StatRecord>,
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub message: String,
    pub mode: Mode,
    pub change_count: usize,
    pub classification: ClassificationResult,
    pub llm_used: bool,
}

/// Gather changes, diff text, and stats for the configured mode.
pub fn collect<R: GitRunner + ?Sized>(
    runner: &R,
    opts: &Options,
) -> Result<Collected, GenerateError> {
    ensure_repository(runner)?;

    let (staged, unstaged) = collect_changes(runner)?;
    let (mode, changes) = select_changes(opts.mode, staged, unstaged);
    if changes.is_empty() {
        return Err(GenerateError::NoChanges { mode });
    }
    debug!("Using {} changes from mode {}", changes.len(), mode);

    let diff = collect_diff(runner, mode);

    let wants_stats = resolve_body_mode(opts.body, changes.len(), opts.max_items)
        == BodyMode::Stats
        || opts.llm.is_some();
    let stats = if wants_stats {
        collect_numstat(runner, mode)
    } else {
        Vec::new()
    };

    Ok(Collected {
        mode,
        changes,
        diff,
        stats,
    })
}

/// Classify collected changes and compose the heuristic message.
pub fn draft(collected: &Collected, opts: &Options) -> (ClassificationResult, RenderedMessage) {
    let overrides = Overrides {
        commit_type: opts.commit_type,
        scope: opts.scope.clone(),
        breaking: opts.breaking,
    };
    let result = classify(&collected.changes, &collected.diff, &overrides);
    let rendered = compose(&result, &collected.changes, &collected.stats, opts);
    (result, rendered)
}

/// Run the whole pipeline.
///
/// `transport` is only used when the options enable the model pass. A model
/// failure falls back to the heuristic message unless strict mode is set.
pub async fn generate<R: GitRunner + ?Sized>(
    runner: &R,
    opts: &Options,
    transport: Option<&dyn ChatTransport>,
) -> Result<Outcome, GenerateError> {
    let collected = collect(runner, opts)?;
    let (classification, rendered) = draft(&collected, opts);

    let mut message = rendered.message;
    let mut llm_used = false;

    if let Some(llm) = &opts.llm
        && let Some(transport) = transport
    {
        let ctx = PromptContext {
            opts,
            mode: collected.mode,
            changes: &collected.changes,
            stats: &collected.stats,
            diff: &collected.diff,
            classification: &classification,
            heuristic: &message,
        };
        match generate_message(llm, &ctx, transport).await {
            Ok(text) => {
                message = text;
                llm_used = true;
            }
            Err(e) if llm.strict => return Err(e.into()),
            Err(e) => warn!("llm failed, using heuristic: {}", e),
        }
    }

    Ok(Outcome {
        message,
        mode: collected.mode,
        change_count: collected.changes.len(),
        classification,
        llm_used,
    })
}
