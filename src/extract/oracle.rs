use crate::error::OracleError;
use crate::process::Process;

/// The external semantic-extraction collaborator.
///
/// Given the CSV form of a sheet, its name, and optionally a rendered image
/// of the sheet, the oracle infers a process document. Implementations wrap
/// whatever large-model service is in use; the orchestrator only depends on
/// this trait, which keeps the oracle substitutable in tests.
///
/// Timeout and retry policy belong to the implementation, not the caller:
/// from the core's point of view this is one synchronous request/response.
pub trait ProcessOracle {
    fn extract_process(
        &self,
        sheet_csv: &str,
        sheet_name: &str,
        sheet_image: Option<&[u8]>,
    ) -> Result<Process, OracleError>;
}
