//! Tests for extraction orchestration and the oracle seam.
mod common;
use common::*;
use laneflow::prelude::*;
use std::result::Result;

/// Oracle double that returns a fixed process and records nothing.
struct StubOracle;

impl ProcessOracle for StubOracle {
    fn extract_process(
        &self,
        _sheet_csv: &str,
        sheet_name: &str,
        _sheet_image: Option<&[u8]>,
    ) -> Result<Process, OracleError> {
        let mut process = create_sample_process();
        process.process_id = slugify(sheet_name);
        process.process_name = sheet_name.to_string();
        Ok(process)
    }
}

/// Oracle double that always fails.
struct FailingOracle;

impl ProcessOracle for FailingOracle {
    fn extract_process(
        &self,
        _sheet_csv: &str,
        _sheet_name: &str,
        _sheet_image: Option<&[u8]>,
    ) -> Result<Process, OracleError> {
        Err(OracleError::Upstream("service offline".to_string()))
    }
}

#[test]
fn test_auto_uses_template_for_compliant_sheets() {
    let extractor = ProcessExtractor::new(ExtractionPolicy::Auto).with_oracle(Box::new(StubOracle));

    let (process, report) = extractor
        .extract_sheet(&create_review_table())
        .expect("extract");

    assert_eq!(report.method, ExtractionMethod::Template);
    assert!(report.validation.is_some());
    assert!(report.confidence >= 0.7);
    assert_eq!(process.process_id, "review");
}

#[test]
fn test_auto_falls_back_to_oracle() {
    let extractor = ProcessExtractor::new(ExtractionPolicy::Auto).with_oracle(Box::new(StubOracle));

    let (process, report) = extractor
        .extract_sheet(&create_unmatched_table())
        .expect("extract");

    assert_eq!(report.method, ExtractionMethod::Oracle);
    assert_eq!(report.confidence, ORACLE_CONFIDENCE);
    assert!(report.validation.is_none());
    assert_eq!(process.process_name, "junk");
}

#[test]
fn test_template_only_rejects_noncompliant_sheets() {
    let extractor =
        ProcessExtractor::new(ExtractionPolicy::TemplateOnly).with_oracle(Box::new(StubOracle));

    let result = extractor.extract_sheet(&create_unmatched_table());
    match result {
        Err(ExtractionError::TemplateRejected(reason)) => {
            assert!(reason.contains("Missing required columns"));
        }
        other => panic!("expected TemplateRejected, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_oracle_only_skips_template() {
    let extractor =
        ProcessExtractor::new(ExtractionPolicy::OracleOnly).with_oracle(Box::new(StubOracle));

    // Even a fully compliant sheet goes to the oracle under this policy.
    let (_, report) = extractor
        .extract_sheet(&create_review_table())
        .expect("extract");
    assert_eq!(report.method, ExtractionMethod::Oracle);
}

#[test]
fn test_fallback_without_oracle_fails() {
    let extractor = ProcessExtractor::new(ExtractionPolicy::Auto);

    let result = extractor.extract_sheet(&create_unmatched_table());
    assert!(matches!(result, Err(ExtractionError::OracleUnavailable)));
}

#[test]
fn test_oracle_failure_surfaces() {
    let extractor =
        ProcessExtractor::new(ExtractionPolicy::OracleOnly).with_oracle(Box::new(FailingOracle));

    let result = extractor.extract_sheet(&create_review_table());
    assert!(matches!(
        result,
        Err(ExtractionError::Oracle(OracleError::Upstream(_)))
    ));
}

#[test]
fn test_batch_isolates_sheet_failures() {
    let workbook = MemoryWorkbook::new(vec![create_review_table(), create_unmatched_table()]);
    let extractor = ProcessExtractor::new(ExtractionPolicy::TemplateOnly);

    let outcome = extractor.extract_workbook(&workbook).expect("workbook");

    assert!(!outcome.success());
    assert_eq!(outcome.sheets.len(), 2);
    assert!(outcome.sheets[0].result.is_ok());
    assert!(outcome.sheets[1].result.is_err());
    assert_eq!(outcome.sheets[0].sheet, "review");
    assert_eq!(outcome.sheets[1].sheet, "junk");
}

#[test]
fn test_batch_all_sheets_succeed() {
    let workbook = MemoryWorkbook::new(vec![create_review_table(), create_unmatched_table()]);
    let extractor = ProcessExtractor::new(ExtractionPolicy::Auto).with_oracle(Box::new(StubOracle));

    let outcome = extractor.extract_workbook(&workbook).expect("workbook");
    assert!(outcome.success());
}
