use clap::Parser;
use laneflow::prelude::*;
use std::fs;
use std::path::Path;

/// Renders a business process as a Mermaid flowchart.
///
/// Accepts either a process JSON document or a semicolon-separated CSV
/// export of a template-compliant sheet.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a process JSON document or a CSV sheet export
    input_path: String,

    /// Path to write the Mermaid document (stdout when omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Process name to use for CSV input (defaults to the file stem)
    #[arg(short, long)]
    name: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let input_path = Path::new(&cli.input_path);
    let content = fs::read_to_string(input_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", cli.input_path, e))
    });

    let extension = input_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let process = match extension.as_str() {
        "json" => Process::from_json_str(&content).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to parse process JSON: {}", e))
        }),
        "csv" => {
            let sheet_name = cli.name.clone().unwrap_or_else(|| {
                input_path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("process")
                    .to_string()
            });
            let table = SheetTable::from_csv(sheet_name, &content);

            let extractor = ProcessExtractor::new(ExtractionPolicy::TemplateOnly);
            let (process, report) = extractor
                .extract_sheet(&table)
                .unwrap_or_else(|e| exit_with_error(&format!("Extraction failed: {}", e)));
            println!(
                "Extracted '{}' via {:?} ({:.0}% confidence, {} dropped references)",
                report.sheet,
                report.method,
                report.confidence * 100.0,
                report.dropped_references
            );
            process
        }
        other => exit_with_error(&format!(
            "Unsupported input extension '{}': expected .json or .csv",
            other
        )),
    };

    let (diagram, stats) = MermaidGenerator::new().generate_with_stats(&process);
    println!(
        "Rendered {} edges ({} dangling references dropped)",
        stats.edges_emitted, stats.dropped_references
    );

    match cli.output {
        Some(output_path) => {
            fs::write(&output_path, &diagram).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", output_path, e))
            });
            println!("Saved Mermaid chart to: {}", output_path);
        }
        None => println!("\n{}", diagram),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
