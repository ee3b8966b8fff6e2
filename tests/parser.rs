//! Tests for the direct template parser.
mod common;
use common::*;
use laneflow::prelude::*;

fn find<'p>(process: &'p Process, step_id: &str) -> &'p Step {
    process
        .find_step(step_id)
        .unwrap_or_else(|| panic!("step '{}' missing", step_id))
}

#[test]
fn test_parse_review_table() {
    let extraction = parse_template(&create_review_table());

    assert!(extraction.validation.can_parse_directly());
    assert_eq!(extraction.dropped_references, 0);
    let process = extraction.process.expect("direct parse");

    assert_eq!(process.process_id, "review");
    assert_eq!(process.process_name, "review");
    assert_eq!(process.process_roles.len(), 1);
    assert_eq!(process.process_roles[0].role_id, "officer");
    assert_eq!(process.process_roles[0].role_title, "Officer");
}

#[test]
fn test_numeric_reference_resolves_to_condition_id() {
    // "Next Step: 2" points at a row that parses as a decision, so the
    // reference must land on the prefixed id, not a dead positional guess.
    let process = parse_template(&create_review_table())
        .process
        .expect("direct parse");

    let review = find(&process, "step_1");
    assert_eq!(review.next_step.as_deref(), Some("CONDITION::2"));
    assert_eq!(review.step_role.as_deref(), Some("officer"));
}

#[test]
fn test_condition_row_branches() {
    let process = parse_template(&create_review_table())
        .process
        .expect("direct parse");

    let decision = find(&process, "CONDITION::2");
    assert!(decision.is_condition());
    assert_eq!(decision.next_step, None);
    assert_eq!(decision.next_step_yes.as_deref(), Some(END_STEP));
    assert_eq!(decision.next_step_no.as_deref(), Some("step_1"));
}

#[test]
fn test_control_steps_synthesized() {
    let process = parse_template(&create_review_table())
        .process
        .expect("direct parse");

    let start = find(&process, START_STEP);
    assert_eq!(start.next_step.as_deref(), Some("step_1"));
    assert_eq!(process.process_steps[0].step_id, START_STEP);

    let end = find(&process, END_STEP);
    assert_eq!(end.step_title, "End");

    assert!(process.find_step(ABORT_STEP).is_none());
}

#[test]
fn test_abort_synthesized_when_referenced() {
    let mut table = create_review_table();
    table.rows[1].insert("No→".to_string(), "abort".to_string());

    let process = parse_template(&table).process.expect("direct parse");

    let decision = find(&process, "CONDITION::2");
    assert_eq!(decision.next_step_no.as_deref(), Some(ABORT_STEP));
    assert_eq!(find(&process, ABORT_STEP).step_title, "Abort");
    let abort_count = process
        .process_steps
        .iter()
        .filter(|step| step.step_id == ABORT_STEP)
        .count();
    assert_eq!(abort_count, 1);
}

#[test]
fn test_reference_synonyms() {
    let mut table = create_review_table();
    table.rows[0].insert("Next Step".to_string(), "Finish".to_string());

    let process = parse_template(&table).process.expect("direct parse");
    assert_eq!(find(&process, "step_1").next_step.as_deref(), Some(END_STEP));
}

#[test]
fn test_title_reference_resolves() {
    let mut table = create_review_table();
    table.rows[1].insert("No→".to_string(), "review".to_string());

    let process = parse_template(&table).process.expect("direct parse");
    assert_eq!(
        find(&process, "CONDITION::2").next_step_no.as_deref(),
        Some("step_1")
    );
}

#[test]
fn test_unresolved_reference_dropped_and_counted() {
    let mut table = create_review_table();
    table.rows[0].insert("Next Step".to_string(), "nowhere".to_string());

    let extraction = parse_template(&table);
    assert_eq!(extraction.dropped_references, 1);

    let process = extraction.process.expect("direct parse");
    assert_eq!(find(&process, "step_1").next_step, None);
}

#[test]
fn test_condition_via_marker_cell() {
    let mut table = create_review_table();
    table.rows[0].insert("Condition?".to_string(), "x".to_string());
    table.rows[0].insert("Next Step".to_string(), String::new());
    table.rows[0].insert("Yes→".to_string(), "2".to_string());

    let process = parse_template(&table).process.expect("direct parse");
    let step = find(&process, "CONDITION::1");
    assert!(step.is_condition());
    assert_eq!(step.next_step_yes.as_deref(), Some("CONDITION::2"));
}

#[test]
fn test_titleless_rows_skipped() {
    let mut table = create_review_table();
    table.rows.push(row(&[("Step #", "3"), ("Role", "Ghost")]));

    let process = parse_template(&table).process.expect("direct parse");
    assert!(process.find_step("step_3").is_none());
    // The role column of a skipped row still contributes a role.
    assert!(process.find_role("ghost").is_some());
}

#[test]
fn test_notes_split_on_semicolons() {
    let mut table = SheetTable::new(
        "noted",
        headers(&["Step #", "Role", "Step Title", "Next Step", "Notes"]),
    );
    table.rows.push(row(&[
        ("Step #", "1"),
        ("Role", "Clerk"),
        ("Step Title", "File"),
        ("Next Step", "END"),
        ("Notes", "Check twice; Use blue ink ; "),
    ]));

    let process = parse_template(&table).process.expect("direct parse");
    assert_eq!(
        find(&process, "step_1").step_notes,
        vec!["Check twice".to_string(), "Use blue ink".to_string()]
    );
}

#[test]
fn test_roles_deduplicated_in_first_seen_order() {
    let mut table = create_review_table();
    table.rows.push(row(&[
        ("Step #", "3"),
        ("Role", "Clerk"),
        ("Step Title", "Archive"),
        ("Next Step", "END"),
    ]));
    table.rows.push(row(&[
        ("Step #", "4"),
        ("Role", "officer"),
        ("Step Title", "Sign off"),
        ("Next Step", "END"),
    ]));

    let process = parse_template(&table).process.expect("direct parse");
    let role_ids: Vec<&str> = process
        .process_roles
        .iter()
        .map(|role| role.role_id.as_str())
        .collect();
    assert_eq!(role_ids, vec!["officer", "clerk"]);
}

#[test]
fn test_gate_failure_yields_no_process() {
    let extraction = parse_template(&create_unmatched_table());

    assert!(!extraction.validation.can_parse_directly());
    assert!(extraction.process.is_none());
    assert_eq!(extraction.dropped_references, 0);
}

#[test]
fn test_ensure_control_steps_on_empty_list() {
    let steps = ensure_control_steps(Vec::new());

    // No START without a first step to wire it to; END always.
    assert!(!steps.iter().any(|step| step.step_id == START_STEP));
    assert!(steps.iter().any(|step| step.step_id == END_STEP));
}

#[test]
fn test_ensure_control_steps_idempotent() {
    let once = ensure_control_steps(create_sample_process().process_steps);
    let twice = ensure_control_steps(once.clone());
    assert_eq!(once, twice);
}
