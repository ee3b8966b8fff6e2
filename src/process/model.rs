use serde::{Deserialize, Serialize};

use super::ids::{CONDITION_PREFIX, SYSTEM_PREFIX, strip_step_prefix};

/// A role/actor responsible for steps in a business process.
///
/// Immutable once built; `role_id` is a normalized token, `role_title` the
/// display string rendered as the swimlane heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: String,
    pub role_title: String,
    #[serde(default)]
    pub role_notes: Vec<String>,
}

/// A single step in a business process.
///
/// A step is either a plain transition node (only `next_step` set) or a
/// decision node (only the `next_step_yes`/`next_step_no` pair set). The
/// metadata fields mirror the wire schema of the extraction oracle; any key
/// the schema does not recognize lands in `additional_attributes` and is
/// re-emitted verbatim on serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step_id: String,
    #[serde(default)]
    pub step_role: Option<String>,
    #[serde(default)]
    pub step_title: String,
    #[serde(default)]
    pub step_description: Option<String>,
    #[serde(default)]
    pub next_step: Option<String>,
    #[serde(default)]
    pub next_step_yes: Option<String>,
    #[serde(default)]
    pub next_step_no: Option<String>,
    #[serde(default)]
    pub step_notes: Vec<String>,
    #[serde(default)]
    pub manual_system: Option<String>,
    #[serde(default, rename = "user_role_code_user_id_user_name")]
    pub user_credentials: Option<String>,
    #[serde(default, rename = "password_in_test_system")]
    pub password_info: Option<String>,
    #[serde(default)]
    pub users_name: Option<String>,
    #[serde(default, rename = "program_id_t_code_screen_name")]
    pub program_location: Option<String>,
    #[serde(default)]
    pub yes_when: Option<String>,
    #[serde(default)]
    pub no_when: Option<String>,
    /// Open-ended bag of attributes not covered by the typed fields above.
    /// Deliberately untyped: forward-compatibility with the oracle's output.
    #[serde(flatten)]
    pub additional_attributes: serde_json::Map<String, serde_json::Value>,
}

impl Step {
    /// Whether this step is a decision point.
    pub fn is_condition(&self) -> bool {
        self.step_id.starts_with(CONDITION_PREFIX)
    }

    /// Whether this step is one of the START/END/ABORT control steps.
    pub fn is_control(&self) -> bool {
        self.step_id.starts_with(SYSTEM_PREFIX)
    }

    /// Whether this step branches on a yes/no pair.
    pub fn has_conditional_flow(&self) -> bool {
        self.next_step_yes.is_some() || self.next_step_no.is_some()
    }

    /// The step id without any reserved prefix.
    pub fn stripped_id(&self) -> &str {
        strip_step_prefix(&self.step_id)
    }
}

/// A complete business process: its actors and its ordered step graph.
///
/// Step order is insertion order and is significant: it determines the order
/// steps appear inside their swimlanes when rendered.
///
/// Invariants the constructors maintain: step ids are unique after prefix
/// stripping (a bare id and its `CONDITION::` form are the same identity),
/// and at least one START and one END step exist, synthesized if the source
/// data lacked them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub process_id: String,
    pub process_name: String,
    #[serde(default)]
    pub process_roles: Vec<Role>,
    #[serde(default)]
    pub process_steps: Vec<Step>,
}

impl Process {
    /// Finds a step by id, treating a bare id and its prefixed form as the
    /// same identity.
    pub fn find_step(&self, step_id: &str) -> Option<&Step> {
        let bare = strip_step_prefix(step_id);
        self.process_steps
            .iter()
            .find(|step| step.step_id == step_id || step.stripped_id() == bare)
    }

    /// Finds a role by its id.
    pub fn find_role(&self, role_id: &str) -> Option<&Role> {
        self.process_roles.iter().find(|role| role.role_id == role_id)
    }
}
