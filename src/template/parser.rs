//! Direct parser for template-compliant sheets.
//!
//! Construction runs in two passes: the first assigns an id to every row
//! that carries a title and registers the row's number and lowercased title
//! in a lookup table, the second builds the steps and resolves transition
//! references against that table. A post-pass synthesizes the START/END/ABORT
//! control steps the sheet left implicit.

use ahash::AHashMap;
use itertools::Itertools;

use super::schema::ColumnType;
use super::validation::{TemplateValidation, validate_headers};
use crate::process::{
    ABORT_STEP, CONDITION_PREFIX, END_STEP, Process, Role, START_STEP, Step, slugify,
};
use crate::table::SheetTable;

/// Positional id scaffolding used when a row has no usable step number, and
/// stripped from the bare part of condition ids.
const STEP_ID_SCAFFOLD: &str = "step_";

/// Result of a template parse attempt: the validation verdict always, a
/// process only when the sheet passed the direct-parse gate, and the number
/// of transition references that could not be resolved (edges silently
/// omitted — lenient by design, but observable).
#[derive(Debug)]
pub struct TemplateExtraction {
    pub validation: TemplateValidation,
    pub process: Option<Process>,
    pub dropped_references: usize,
}

/// Parses template-compliant sheets into processes without the oracle.
#[derive(Debug, Default)]
pub struct TemplateParser {
    columns: AHashMap<ColumnType, String>,
    dropped_references: usize,
}

type RowCells = AHashMap<String, String>;

impl TemplateParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the sheet's headers and, if the sheet passes the
    /// direct-parse gate, extracts a process from its rows.
    pub fn parse(&mut self, table: &SheetTable) -> TemplateExtraction {
        let validation = validate_headers(&table.headers);
        if !validation.can_parse_directly() {
            return TemplateExtraction {
                validation,
                process: None,
                dropped_references: 0,
            };
        }

        self.columns = validation.matched_columns.clone();
        self.dropped_references = 0;

        let roles = self.collect_roles(table);
        let steps = ensure_control_steps(self.collect_steps(table));

        let process = Process {
            process_id: slugify(&table.name),
            process_name: table.name.clone(),
            process_roles: roles,
            process_steps: steps,
        };

        TemplateExtraction {
            validation,
            process: Some(process),
            dropped_references: self.dropped_references,
        }
    }

    fn cell<'r>(&self, row: &'r RowCells, column: ColumnType) -> &'r str {
        self.columns
            .get(&column)
            .and_then(|header| row.get(header))
            .map(|value| value.trim())
            .unwrap_or("")
    }

    fn optional_cell(&self, row: &RowCells, column: ColumnType) -> Option<String> {
        let value = self.cell(row, column);
        (!value.is_empty()).then(|| value.to_string())
    }

    fn collect_roles(&self, table: &SheetTable) -> Vec<Role> {
        table
            .rows
            .iter()
            .map(|row| self.cell(row, ColumnType::Role))
            .filter(|title| !title.is_empty())
            .map(|title| Role {
                role_id: slugify(title),
                role_title: title.to_string(),
                role_notes: Vec::new(),
            })
            .unique_by(|role| role.role_id.clone())
            .collect()
    }

    /// Derives the id a row's step will carry. Number-bearing rows get
    /// `step_<number>`, the rest a positional `step_<row index>`; decision
    /// rows trade the scaffolding for the `CONDITION::` prefix.
    fn row_step_id(&self, row: &RowCells, index: usize) -> String {
        let number = self.cell(row, ColumnType::StepNumber);
        let base = if number.is_empty() {
            format!("{STEP_ID_SCAFFOLD}{index}")
        } else {
            format!("{STEP_ID_SCAFFOLD}{number}")
        };
        if self.row_is_condition(row) {
            let bare = base.strip_prefix(STEP_ID_SCAFFOLD).unwrap_or(&base);
            format!("{CONDITION_PREFIX}{bare}")
        } else {
            base
        }
    }

    /// A row is a decision when its marker cell says so, when either branch
    /// target is filled in, or when its title reads as a question.
    fn row_is_condition(&self, row: &RowCells) -> bool {
        let marker = self.cell(row, ColumnType::IsCondition).to_lowercase();
        if matches!(
            marker.as_str(),
            "yes" | "true" | "1" | "x" | "condition" | "decision"
        ) {
            return true;
        }
        if !self.cell(row, ColumnType::YesNext).is_empty()
            || !self.cell(row, ColumnType::NoNext).is_empty()
        {
            return true;
        }
        self.cell(row, ColumnType::StepTitle).ends_with('?')
    }

    fn collect_steps(&mut self, table: &SheetTable) -> Vec<Step> {
        // Pass 1: assign ids and build the reference lookup table. Titles are
        // registered lowercased; on duplicates the last writer wins.
        let mut id_lookup: AHashMap<String, String> = AHashMap::new();
        for (index, row) in table.rows.iter().enumerate() {
            let title = self.cell(row, ColumnType::StepTitle);
            if title.is_empty() {
                continue;
            }
            let step_id = self.row_step_id(row, index);
            let number = self.cell(row, ColumnType::StepNumber);
            if !number.is_empty() {
                id_lookup.insert(number.to_string(), step_id.clone());
            }
            id_lookup.insert(title.to_lowercase(), step_id);
        }

        // Pass 2: build the steps with resolved references.
        let mut steps = Vec::new();
        for (index, row) in table.rows.iter().enumerate() {
            let title = self.cell(row, ColumnType::StepTitle);
            if title.is_empty() {
                continue;
            }

            let step_id = self.row_step_id(row, index);
            let is_condition = step_id.starts_with(CONDITION_PREFIX);

            let role_title = self.cell(row, ColumnType::Role);
            let step_role = (!role_title.is_empty()).then(|| slugify(role_title));

            let (next_step, next_step_yes, next_step_no) = if is_condition {
                let yes_target = self.cell(row, ColumnType::YesNext);
                let no_target = self.cell(row, ColumnType::NoNext);
                (
                    None,
                    self.resolve_reference(yes_target, &id_lookup),
                    self.resolve_reference(no_target, &id_lookup),
                )
            } else {
                let next_target = self.cell(row, ColumnType::NextStep);
                (self.resolve_reference(next_target, &id_lookup), None, None)
            };

            let step_notes = self
                .cell(row, ColumnType::Notes)
                .split(';')
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .map(String::from)
                .collect();

            steps.push(Step {
                step_id,
                step_role,
                step_title: title.to_string(),
                step_description: self.optional_cell(row, ColumnType::Description),
                next_step,
                next_step_yes,
                next_step_no,
                step_notes,
                manual_system: self.optional_cell(row, ColumnType::ManualSystem),
                user_credentials: self.optional_cell(row, ColumnType::UserId),
                program_location: self.optional_cell(row, ColumnType::ProgramId),
                yes_when: self.optional_cell(row, ColumnType::YesWhen),
                no_when: self.optional_cell(row, ColumnType::NoWhen),
                ..Default::default()
            });
        }
        steps
    }

    /// Resolves a transition cell to a step id.
    ///
    /// Closed synonym sets map to the control steps; otherwise the lookup
    /// table is consulted with the raw then the lowercased text; a purely
    /// numeric reference falls back to a positional id guess. Anything else
    /// is unresolved: the edge is omitted and the drop counter advances.
    fn resolve_reference(
        &mut self,
        reference: &str,
        id_lookup: &AHashMap<String, String>,
    ) -> Option<String> {
        if reference.is_empty() {
            return None;
        }
        let lower = reference.to_lowercase();
        match lower.as_str() {
            "end" | "finish" | "done" | "complete" => return Some(END_STEP.to_string()),
            "abort" | "cancel" | "fail" | "error" | "reject" => {
                return Some(ABORT_STEP.to_string());
            }
            "start" | "begin" => return Some(START_STEP.to_string()),
            _ => {}
        }
        if let Some(id) = id_lookup.get(reference).or_else(|| id_lookup.get(&lower)) {
            return Some(id.clone());
        }
        if reference.chars().all(|c| c.is_ascii_digit()) {
            return Some(format!("{STEP_ID_SCAFFOLD}{reference}"));
        }
        self.dropped_references += 1;
        None
    }
}

/// Convenience wrapper over [`TemplateParser::parse`].
pub fn parse_template(table: &SheetTable) -> TemplateExtraction {
    TemplateParser::new().parse(table)
}

/// Ensures the control steps exist: prepends a START wired to the first
/// row-derived step when missing, appends an END when missing, and appends
/// an ABORT when some transition references it but no row defined it.
///
/// Pure: takes the step list and returns a new one with 0-3 synthetic steps.
pub fn ensure_control_steps(steps: Vec<Step>) -> Vec<Step> {
    let has_start = steps.iter().any(|step| step.step_id == START_STEP);
    let has_end = steps.iter().any(|step| step.step_id == END_STEP);

    let mut result = Vec::with_capacity(steps.len() + 3);

    if !has_start && !steps.is_empty() {
        result.push(Step {
            step_id: START_STEP.to_string(),
            step_title: "Start".to_string(),
            next_step: Some(steps[0].step_id.clone()),
            ..Default::default()
        });
    }
    result.extend(steps);

    if !has_end {
        result.push(Step {
            step_id: END_STEP.to_string(),
            step_title: "End".to_string(),
            ..Default::default()
        });
    }

    let abort_referenced = result.iter().any(|step| {
        [&step.next_step, &step.next_step_yes, &step.next_step_no]
            .into_iter()
            .flatten()
            .any(|target| target == ABORT_STEP)
    });
    let has_abort = result.iter().any(|step| step.step_id == ABORT_STEP);
    if abort_referenced && !has_abort {
        result.push(Step {
            step_id: ABORT_STEP.to_string(),
            step_title: "Abort".to_string(),
            ..Default::default()
        });
    }

    result
}
