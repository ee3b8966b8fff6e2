//! Label text preparation for the Mermaid grammar.

use crate::process::Step;

/// Strips or rewrites characters that break Mermaid node and edge labels:
/// double quotes become single quotes, emphasis markers and the comment
/// character are dropped, ampersands become the word "and", angle brackets
/// are removed.
pub fn sanitize_label(label: &str) -> String {
    label
        .replace('"', "'")
        .replace('*', "")
        .replace('#', "")
        .replace('&', "and")
        .replace('<', "")
        .replace('>', "")
}

/// Composes a step's node label: the title first, then one sub-line per
/// present metadata field (execution mode, login, password, location), each
/// sanitized independently.
pub fn format_step_label(step: &Step) -> String {
    let mut parts = vec![sanitize_label(&step.step_title)];

    if let Some(mode) = &step.manual_system {
        if mode.eq_ignore_ascii_case("manual") {
            parts.push(sanitize_label(mode));
        } else {
            parts.push(format!("SYSTEM {}", sanitize_label(mode)));
        }
    }
    if let Some(login) = &step.user_credentials {
        parts.push(format!("LOGIN {}", sanitize_label(login)));
    }
    if let Some(password) = &step.password_info {
        parts.push(format!("PASSWORD {}", sanitize_label(password)));
    }
    if let Some(location) = &step.program_location {
        parts.push(format!("LOCATION {}", sanitize_label(location)));
    }

    parts.join("<br/>")
}
