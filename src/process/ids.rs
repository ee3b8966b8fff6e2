//! Reserved step identifier prefixes and the control step ids.
//!
//! A step id may carry one of two reserved prefixes: `CONDITION::` marks a
//! decision step, `SYSTEM::` marks one of the three singleton control steps
//! (START, END, ABORT). Stripping a prefix yields the "bare" id used for
//! cross-referencing and display.

/// Marks a decision step with exactly two outgoing transitions (yes/no).
pub const CONDITION_PREFIX: &str = "CONDITION::";
/// Marks one of the singleton control steps.
pub const SYSTEM_PREFIX: &str = "SYSTEM::";

/// Process entry point. Must carry a `next_step` to the first real step.
pub const START_STEP: &str = "SYSTEM::START";
/// Successful completion. No outgoing edges.
pub const END_STEP: &str = "SYSTEM::END";
/// Abnormal termination. No outgoing edges.
pub const ABORT_STEP: &str = "SYSTEM::ABORT";

/// Removes a reserved prefix from a step id, if present.
///
/// Idempotent: stripping an already-bare id returns it unchanged.
pub fn strip_step_prefix(step_id: &str) -> &str {
    for prefix in [CONDITION_PREFIX, SYSTEM_PREFIX] {
        if let Some(bare) = step_id.strip_prefix(prefix) {
            return bare;
        }
    }
    step_id
}

/// Normalizes display text into an identifier token: lowercased, with every
/// run of non-alphanumeric characters collapsed into a single underscore.
/// Used for role ids and process ids derived from free-form titles.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}
