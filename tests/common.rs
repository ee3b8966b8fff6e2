//! Common test utilities for building sheet tables and processes.
use ahash::AHashMap;
use laneflow::prelude::*;

/// Builds a row map from header/cell pairs. Headers not listed read as
/// empty cells, matching the table reader's missing-cell sentinel.
#[allow(dead_code)]
pub fn row(cells: &[(&str, &str)]) -> AHashMap<String, String> {
    cells
        .iter()
        .map(|(header, value)| (header.to_string(), value.to_string()))
        .collect()
}

#[allow(dead_code)]
pub fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// A minimal template-compliant sheet: one plain step and one decision that
/// completes on approval and loops back on rejection.
#[allow(dead_code)]
pub fn create_review_table() -> SheetTable {
    let mut table = SheetTable::new(
        "review",
        headers(&[
            "Step #",
            "Role",
            "Step Title",
            "Next Step",
            "Condition?",
            "Yes→",
            "No→",
        ]),
    );
    table.rows.push(row(&[
        ("Step #", "1"),
        ("Role", "Officer"),
        ("Step Title", "Review"),
        ("Next Step", "2"),
    ]));
    table.rows.push(row(&[
        ("Step #", "2"),
        ("Step Title", "Approved?"),
        ("Yes→", "END"),
        ("No→", "1"),
    ]));
    table
}

/// A sheet whose headers match nothing in the template schema.
#[allow(dead_code)]
pub fn create_unmatched_table() -> SheetTable {
    let mut table = SheetTable::new("junk", headers(&["Foo", "Bar", "Baz"]));
    table
        .rows
        .push(row(&[("Foo", "1"), ("Bar", "2"), ("Baz", "3")]));
    table
}

/// A small hand-built process: START -> Work (one role) -> END.
#[allow(dead_code)]
pub fn create_sample_process() -> Process {
    Process {
        process_id: "sample".to_string(),
        process_name: "Sample".to_string(),
        process_roles: vec![Role {
            role_id: "actor".to_string(),
            role_title: "Actor".to_string(),
            role_notes: Vec::new(),
        }],
        process_steps: vec![
            Step {
                step_id: START_STEP.to_string(),
                step_title: "Start".to_string(),
                next_step: Some("work".to_string()),
                ..Default::default()
            },
            Step {
                step_id: "work".to_string(),
                step_role: Some("actor".to_string()),
                step_title: "Do Work".to_string(),
                next_step: Some(END_STEP.to_string()),
                ..Default::default()
            },
            Step {
                step_id: END_STEP.to_string(),
                step_title: "End".to_string(),
                ..Default::default()
            },
        ],
    }
}
