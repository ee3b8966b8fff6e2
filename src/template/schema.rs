//! Declarative schema for the spreadsheet template's columns.
//!
//! Each semantic column type carries a snake_case tag and a set of lowercase
//! aliases. Headers are matched leniently: against the tag with underscores
//! rendered as spaces, the tag as one unbroken token, the raw tag, and
//! finally the alias set.

use serde::{Deserialize, Serialize};

/// Semantic column types the template recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    StepNumber,
    Role,
    StepTitle,
    Description,
    NextStep,
    IsCondition,
    YesNext,
    NoNext,
    YesWhen,
    NoWhen,
    Notes,
    ManualSystem,
    SystemName,
    UserId,
    ProgramId,
}

impl ColumnType {
    /// The canonical snake_case tag for this column type.
    pub fn tag(&self) -> &'static str {
        match self {
            ColumnType::StepNumber => "step_number",
            ColumnType::Role => "role",
            ColumnType::StepTitle => "step_title",
            ColumnType::Description => "description",
            ColumnType::NextStep => "next_step",
            ColumnType::IsCondition => "is_condition",
            ColumnType::YesNext => "yes_next",
            ColumnType::NoNext => "no_next",
            ColumnType::YesWhen => "yes_when",
            ColumnType::NoWhen => "no_when",
            ColumnType::Notes => "notes",
            ColumnType::ManualSystem => "manual_system",
            ColumnType::SystemName => "system_name",
            ColumnType::UserId => "user_id",
            ColumnType::ProgramId => "program_id",
        }
    }
}

/// One entry of the template's column table: a semantic type, whether a
/// template must provide it, and the header aliases that map onto it.
#[derive(Debug, Clone)]
pub struct ColumnRule {
    pub column_type: ColumnType,
    pub required: bool,
    pub aliases: &'static [&'static str],
}

impl ColumnRule {
    /// Tests whether a raw header binds to this column type.
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        let tag = self.column_type.tag();
        if header == tag.replace('_', " ") || header == tag.replace('_', "") || header == tag {
            return true;
        }
        self.aliases.iter().any(|alias| *alias == header)
    }
}

/// The fixed, ordered column table. The first rule to match a header wins,
/// so more specific types come before the catch-all aliases they share
/// (e.g. "type" appears under both `IsCondition` and `ManualSystem`).
pub const TEMPLATE_COLUMNS: &[ColumnRule] = &[
    ColumnRule {
        column_type: ColumnType::StepNumber,
        required: true,
        aliases: &[
            "step #", "step", "step no", "step no.", "#", "no", "no.", "id", "step_id",
        ],
    },
    ColumnRule {
        column_type: ColumnType::Role,
        required: true,
        aliases: &[
            "role",
            "actor",
            "responsible",
            "owner",
            "assigned to",
            "performer",
            "swimlane",
        ],
    },
    ColumnRule {
        column_type: ColumnType::StepTitle,
        required: true,
        aliases: &[
            "title",
            "step title",
            "name",
            "step name",
            "action",
            "activity",
            "task",
        ],
    },
    ColumnRule {
        column_type: ColumnType::Description,
        required: false,
        aliases: &[
            "description",
            "desc",
            "details",
            "step description",
            "explanation",
        ],
    },
    ColumnRule {
        column_type: ColumnType::NextStep,
        required: false,
        aliases: &["next", "next step", "goes to", "then", "flow to", "->"],
    },
    ColumnRule {
        column_type: ColumnType::IsCondition,
        required: false,
        aliases: &[
            "condition",
            "is condition",
            "decision",
            "condition?",
            "is decision",
            "type",
        ],
    },
    ColumnRule {
        column_type: ColumnType::YesNext,
        required: false,
        aliases: &[
            "yes", "yes next", "yes ->", "yes→", "if yes", "true", "yes path", "on yes",
        ],
    },
    ColumnRule {
        column_type: ColumnType::NoNext,
        required: false,
        aliases: &[
            "no", "no next", "no ->", "no→", "if no", "false", "no path", "on no",
        ],
    },
    ColumnRule {
        column_type: ColumnType::YesWhen,
        required: false,
        aliases: &["yes when", "yes condition", "yes if", "condition for yes"],
    },
    ColumnRule {
        column_type: ColumnType::NoWhen,
        required: false,
        aliases: &["no when", "no condition", "no if", "condition for no"],
    },
    ColumnRule {
        column_type: ColumnType::Notes,
        required: false,
        aliases: &["notes", "note", "comments", "remarks", "annotations"],
    },
    ColumnRule {
        column_type: ColumnType::ManualSystem,
        required: false,
        aliases: &[
            "manual/system",
            "manual or system",
            "type",
            "execution type",
            "mode",
        ],
    },
    ColumnRule {
        column_type: ColumnType::SystemName,
        required: false,
        aliases: &["system", "system name", "application", "app", "tool"],
    },
    ColumnRule {
        column_type: ColumnType::UserId,
        required: false,
        aliases: &["user", "user id", "login", "username", "user name"],
    },
    ColumnRule {
        column_type: ColumnType::ProgramId,
        required: false,
        aliases: &[
            "program",
            "program id",
            "t-code",
            "tcode",
            "screen",
            "transaction",
        ],
    },
];
