//! Extraction orchestration: template-first with oracle fallback.
//!
//! The orchestrator is the only component aware of the oracle. It chooses an
//! extraction strategy per sheet according to the configured policy, and
//! reports which method actually produced the process along with a
//! confidence figure.

use crate::error::ExtractionError;
use crate::process::Process;
use crate::table::{SheetTable, TableSource};
use crate::template::{TemplateValidation, parse_template};

use super::oracle::ProcessOracle;
use crate::error::SourceError;

/// Confidence reported for oracle-produced processes. The oracle gives no
/// score of its own, so a fixed figure stands in.
pub const ORACLE_CONFIDENCE: f64 = 0.9;

/// Which extraction strategies the orchestrator may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPolicy {
    /// Try the template parser; fall back to the oracle when the sheet
    /// fails the direct-parse gate.
    #[default]
    Auto,
    /// Never call the oracle; fail loudly when the template parser cannot
    /// produce a process.
    TemplateOnly,
    /// Skip the template parser entirely.
    OracleOnly,
}

/// The strategy that actually produced a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    Template,
    Oracle,
}

/// Per-sheet extraction metadata returned alongside the process.
#[derive(Debug)]
pub struct ExtractionReport {
    pub sheet: String,
    pub method: ExtractionMethod,
    pub confidence: f64,
    /// Present when the template parser ran, whatever its verdict.
    pub validation: Option<TemplateValidation>,
    /// Transition references the template parser dropped as unresolvable.
    pub dropped_references: usize,
}

/// Outcome of one sheet in a batch run.
#[derive(Debug)]
pub struct SheetOutcome {
    pub sheet: String,
    pub result: Result<(Process, ExtractionReport), ExtractionError>,
}

/// Outcome of a whole-workbook batch run. Sheets are independent: one
/// failure never aborts the rest.
#[derive(Debug)]
pub struct BatchOutcome {
    pub sheets: Vec<SheetOutcome>,
}

impl BatchOutcome {
    /// True only when every sheet extracted successfully.
    pub fn success(&self) -> bool {
        self.sheets.iter().all(|outcome| outcome.result.is_ok())
    }
}

/// Extracts processes from sheets, choosing between the template parser and
/// the oracle per the configured policy.
pub struct ProcessExtractor {
    policy: ExtractionPolicy,
    oracle: Option<Box<dyn ProcessOracle>>,
}

impl ProcessExtractor {
    pub fn new(policy: ExtractionPolicy) -> Self {
        Self {
            policy,
            oracle: None,
        }
    }

    /// Attaches the oracle collaborator used for fallback (or exclusively,
    /// under [`ExtractionPolicy::OracleOnly`]).
    pub fn with_oracle(mut self, oracle: Box<dyn ProcessOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Extracts a process from a single sheet.
    pub fn extract_sheet(
        &self,
        table: &SheetTable,
    ) -> Result<(Process, ExtractionReport), ExtractionError> {
        if self.policy != ExtractionPolicy::OracleOnly {
            let extraction = parse_template(table);
            if let Some(process) = extraction.process {
                let report = ExtractionReport {
                    sheet: table.name.clone(),
                    method: ExtractionMethod::Template,
                    confidence: extraction.validation.confidence,
                    validation: Some(extraction.validation),
                    dropped_references: extraction.dropped_references,
                };
                return Ok((process, report));
            }
            if self.policy == ExtractionPolicy::TemplateOnly {
                return Err(ExtractionError::TemplateRejected(
                    extraction.validation.messages.join("; "),
                ));
            }
        }

        let oracle = self
            .oracle
            .as_deref()
            .ok_or(ExtractionError::OracleUnavailable)?;
        let process = oracle.extract_process(&table.to_csv(), &table.name, None)?;
        let report = ExtractionReport {
            sheet: table.name.clone(),
            method: ExtractionMethod::Oracle,
            confidence: ORACLE_CONFIDENCE,
            validation: None,
            dropped_references: 0,
        };
        Ok((process, report))
    }

    /// Extracts every sheet of a workbook independently.
    ///
    /// A workbook that cannot be opened at all propagates as an error; a
    /// sheet that fails to read or extract is recorded in its outcome and
    /// the remaining sheets still run.
    pub fn extract_workbook(
        &self,
        source: &dyn TableSource,
    ) -> Result<BatchOutcome, SourceError> {
        let names = source.sheet_names()?;
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let result = source
                .sheet(&name)
                .map_err(ExtractionError::from)
                .and_then(|table| self.extract_sheet(&table));
            sheets.push(SheetOutcome {
                sheet: name,
                result,
            });
        }
        Ok(BatchOutcome { sheets })
    }
}
