//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! laneflow crate. Import this module to get access to the core pipeline
//! without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use laneflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Parse a process document and render it as a Mermaid flowchart.
//! let json = std::fs::read_to_string("path/to/process.json")?;
//! let process = Process::from_json_str(&json)?;
//!
//! let diagram = MermaidGenerator::new().generate(&process);
//! println!("{}", diagram);
//! # Ok(())
//! # }
//! ```

// Process graph model
pub use crate::process::{
    ABORT_STEP, CONDITION_PREFIX, END_STEP, Process, Role, START_STEP, SYSTEM_PREFIX, Step,
    slugify, strip_step_prefix,
};

// Template schema, validation and parsing
pub use crate::template::{
    ColumnRule, ColumnType, TEMPLATE_COLUMNS, TemplateExtraction, TemplateParser,
    TemplateValidation, ensure_control_steps, parse_template, validate_headers,
};

// Diagram rendering
pub use crate::mermaid::{
    MermaidGenerator, RenderStats, format_step_label, generate_mermaid_from_process,
    sanitize_label,
};

// Tables and extraction orchestration
pub use crate::extract::{
    BatchOutcome, ExtractionMethod, ExtractionPolicy, ExtractionReport, ORACLE_CONFIDENCE,
    ProcessExtractor, ProcessOracle, SheetOutcome,
};
pub use crate::table::{MemoryWorkbook, SheetTable, TableSource};

// Error types
pub use crate::error::{ExtractionError, OracleError, SourceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
