//! Mermaid flowchart generation.
//!
//! Renders a process into a top-down `flowchart` document: control steps as
//! terminal shapes, decisions as diamonds, ordinary steps as rounded boxes,
//! one subgraph per role as a swimlane, and description/note annotations as
//! brace- and comment-shaped satellite nodes on muted dotted edges.
//!
//! Mermaid styles edges by their position in the document, so edge emission
//! order is load-bearing: every emitted edge advances one shared index, and
//! the `linkStyle` declarations are produced from that same index in the
//! same pass. The output is deterministic for a given process.

use std::fmt::Write;

use ahash::AHashMap;
use itertools::Itertools;

use super::label::{format_step_label, sanitize_label};
use crate::process::{ABORT_STEP, END_STEP, Process, START_STEP, Step};

/// Stroke for "yes" branches. A constant of the format, not configurable.
const YES_STROKE: &str = "stroke:#2e7d32,stroke-width:2px";
/// Stroke for "no" branches.
const NO_STROKE: &str = "stroke:#c62828,stroke-width:2px";
/// Stroke for description and note edges.
const MUTED_STROKE: &str = "stroke:#d3d3d3,stroke-width:2px";

/// Longest yes/no edge label taken from a `yes_when`/`no_when` text before
/// truncation with a trailing ellipsis.
const CONDITION_LABEL_MAX: usize = 30;

/// Counters the renderer exposes alongside the document. Dangling transition
/// targets are dropped without error; the count makes the leniency visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub edges_emitted: usize,
    pub dropped_references: usize,
}

/// Accumulates edge lines and their positional style declarations in a
/// single pass, so an edge and its `linkStyle` always agree on the index.
#[derive(Default)]
struct EdgeAccumulator {
    lines: Vec<String>,
    styles: Vec<String>,
    next_index: usize,
}

impl EdgeAccumulator {
    fn push(&mut self, edge: String, style: Option<&str>) {
        if let Some(style) = style {
            self.styles
                .push(format!("linkStyle {} {}", self.next_index, style));
        }
        self.lines.push(edge);
        self.next_index += 1;
    }
}

/// Node lines partitioned by where they render: inside a role's swimlane or
/// in the main graph.
struct NodeLayout<'p> {
    lanes: AHashMap<&'p str, Vec<String>>,
    main: Vec<String>,
}

impl<'p> NodeLayout<'p> {
    fn new(process: &'p Process) -> Self {
        Self {
            lanes: process
                .process_roles
                .iter()
                .map(|role| (role.role_id.as_str(), Vec::new()))
                .collect(),
            main: Vec::new(),
        }
    }

    /// Places a node line in the step's swimlane, or in the main graph when
    /// the step has no role (control steps, orphans).
    fn place(&mut self, step: &Step, line: String) {
        match step
            .step_role
            .as_deref()
            .and_then(|role_id| self.lanes.get_mut(role_id))
        {
            Some(lane) => lane.push(line),
            None => self.main.push(line),
        }
    }
}

/// Generates Mermaid flowchart documents from processes.
///
/// Rendering never fails on a structurally valid process: transitions whose
/// target does not exist are omitted rather than raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidGenerator;

impl MermaidGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Renders the process to a Mermaid document.
    pub fn generate(&self, process: &Process) -> String {
        self.generate_with_stats(process).0
    }

    /// Renders the process and reports edge and drop counts.
    pub fn generate_with_stats(&self, process: &Process) -> (String, RenderStats) {
        let mut layout = NodeLayout::new(process);
        let mut note_nodes: Vec<String> = Vec::new();
        let mut aux_ids: Vec<String> = Vec::new();
        let mut edges = EdgeAccumulator::default();
        let mut dropped_references = 0usize;

        for step in &process.process_steps {
            layout.place(step, node_line(step));

            let source_id = step.stripped_id();

            // Description node first, then its notes, so their edges claim
            // the style indices ahead of the transition edges.
            if step.step_description.is_some() || !step.step_notes.is_empty() {
                let desc_id = format!("{source_id}_desc");
                let desc_label =
                    sanitize_label(step.step_description.as_deref().unwrap_or("Notes"));
                layout.place(
                    step,
                    format!("{desc_id}@{{ shape: braces, label: \"{desc_label}\" }}"),
                );
                edges.push(format!("{source_id} -.-o {desc_id}"), Some(MUTED_STROKE));
                aux_ids.push(desc_id.clone());

                for (index, note) in step.step_notes.iter().enumerate() {
                    let note_id = format!("{source_id}_note_{index}");
                    note_nodes.push(format!(
                        "{note_id}@{{ shape: comment, label: \"{}\" }}",
                        sanitize_label(note)
                    ));
                    edges.push(format!("{desc_id} -.-o {note_id}"), Some(MUTED_STROKE));
                    aux_ids.push(note_id);
                }
            }

            if let Some(target) = &step.next_step {
                match resolve_target(process, target) {
                    Some(target_id) => edges.push(format!("{source_id} --> {target_id}"), None),
                    None => dropped_references += 1,
                }
            }
            if let Some(target) = &step.next_step_yes {
                match resolve_target(process, target) {
                    Some(target_id) => {
                        let label = branch_label(step.yes_when.as_deref(), "yes");
                        edges.push(
                            format!("{source_id} -->|\"{label}\"| {target_id}"),
                            Some(YES_STROKE),
                        );
                    }
                    None => dropped_references += 1,
                }
            }
            if let Some(target) = &step.next_step_no {
                match resolve_target(process, target) {
                    Some(target_id) => {
                        let label = branch_label(step.no_when.as_deref(), "no");
                        edges.push(
                            format!("{source_id} -->|\"{label}\"| {target_id}"),
                            Some(NO_STROKE),
                        );
                    }
                    None => dropped_references += 1,
                }
            }
        }

        let mut out = String::new();
        out.push_str("flowchart TD\n");
        if !process.process_name.is_empty() {
            writeln!(out, "    %% {}", sanitize_label(&process.process_name)).unwrap();
        }

        for line in &layout.main {
            writeln!(out, "    {line}").unwrap();
        }

        for role in &process.process_roles {
            writeln!(
                out,
                "    subgraph {}[{}]",
                role.role_id,
                sanitize_label(&role.role_title)
            )
            .unwrap();
            for line in &layout.lanes[role.role_id.as_str()] {
                writeln!(out, "        {line}").unwrap();
            }
            out.push_str("    end\n");
        }

        for line in &note_nodes {
            writeln!(out, "    {line}").unwrap();
        }

        out.push_str("    %% Connections\n");
        for line in &edges.lines {
            writeln!(out, "    {line}").unwrap();
        }

        if !edges.styles.is_empty() {
            out.push_str("    %% Link styles\n");
            for line in &edges.styles {
                writeln!(out, "    {line}").unwrap();
            }
        }

        out.push_str("    %% Styling\n");
        out.push_str("    classDef noteClass fill:#fff,stroke:#333,color:#aaaaaa\n");
        if !aux_ids.is_empty() {
            writeln!(out, "    class {} noteClass", aux_ids.iter().join(",")).unwrap();
        }

        let stats = RenderStats {
            edges_emitted: edges.next_index,
            dropped_references,
        };
        (out, stats)
    }
}

/// Convenience wrapper that renders with the default generator.
pub fn generate_mermaid_from_process(process: &Process) -> String {
    MermaidGenerator::new().generate(process)
}

fn node_line(step: &Step) -> String {
    let node_id = step.stripped_id();
    match step.step_id.as_str() {
        START_STEP => format!("{node_id}([Start])"),
        END_STEP => format!("{node_id}([End])"),
        ABORT_STEP => format!("{node_id}([Abort])"),
        _ if step.is_condition() => format!("{node_id}{{\"{}\"}}", format_step_label(step)),
        _ => format!("{node_id}(\"{}\")", format_step_label(step)),
    }
}

/// Resolves a transition target to the bare id of an existing step, or
/// `None` when the reference dangles (the edge is then omitted, mirroring
/// the extractor's silent-drop policy).
fn resolve_target<'p>(process: &'p Process, target: &str) -> Option<&'p str> {
    process.find_step(target).map(Step::stripped_id)
}

fn branch_label(condition: Option<&str>, fallback: &str) -> String {
    match condition {
        Some(text) => {
            let truncated: String = if text.chars().count() > CONDITION_LABEL_MAX {
                let head: String = text.chars().take(CONDITION_LABEL_MAX).collect();
                format!("{head}...")
            } else {
                text.to_string()
            };
            sanitize_label(&truncated)
        }
        None => fallback.to_string(),
    }
}
