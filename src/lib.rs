//! # Laneflow - Business Process Extraction and Diagram Engine
//!
//! **Laneflow** turns tabular descriptions of a business process (a sequence
//! of actor-attributed steps with branching) into a formal process graph,
//! and renders that graph deterministically into Mermaid flowchart text with
//! swimlanes, decision diamonds and annotation nodes.
//!
//! ## Core Workflow
//!
//! The engine operates on a canonical in-memory model of a process. The
//! primary workflow is:
//!
//! 1.  **Load a sheet**: obtain ordered headers and rows, either through the
//!     [`table::TableSource`] seam over a real workbook reader or by building
//!     a [`table::SheetTable`] directly.
//! 2.  **Validate**: [`template::validate_headers`] scores the headers
//!     against the column schema and gates direct parsing behind a
//!     confidence threshold.
//! 3.  **Extract**: [`template::parse_template`] builds a [`process::Process`]
//!     from compliant sheets; the [`extract::ProcessExtractor`] orchestrates
//!     fallback to an external [`extract::ProcessOracle`] for everything
//!     else.
//! 4.  **Render**: [`mermaid::MermaidGenerator`] emits the flowchart
//!     document, byte-stable across runs on the same input.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ahash::AHashMap;
//! use laneflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let headers = ["Step #", "Role", "Step Title", "Next Step", "Yes→", "No→"]
//!         .into_iter()
//!         .map(String::from)
//!         .collect();
//!     let mut table = SheetTable::new("onboarding", headers);
//!
//!     let mut row = AHashMap::new();
//!     row.insert("Step #".to_string(), "1".to_string());
//!     row.insert("Role".to_string(), "Officer".to_string());
//!     row.insert("Step Title".to_string(), "Review report".to_string());
//!     row.insert("Next Step".to_string(), "END".to_string());
//!     table.rows.push(row);
//!
//!     let extraction = parse_template(&table);
//!     match extraction.process {
//!         Some(process) => {
//!             let diagram = MermaidGenerator::new().generate(&process);
//!             println!("{}", diagram);
//!         }
//!         None => eprintln!(
//!             "sheet is not template-compliant (confidence {:.2})",
//!             extraction.validation.confidence
//!         ),
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
pub mod mermaid;
pub mod prelude;
pub mod process;
pub mod table;
pub mod template;
