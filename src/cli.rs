//! CLI surface.
//!
//! Thin wrapper over the merge driver: discover inputs in the workspace,
//! merge, flush the output container, render a summary. All flags are
//! ambient (logging, workspace, output format); the merge itself takes no
//! arguments.

use crate::config::{ConfigLoader, MergeConfig};
use crate::discovery::discover_inputs;
use crate::error::MergeError;
use crate::merge::{InputSet, MergeDriver, MergeReport};
use crate::progress::{ConsoleProgress, NullProgress, ProgressSink};
use crate::store::{ContainerRead, FileContainer};
use clap::Parser;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

/// genmerge - merge parallel simulation run output containers
#[derive(Parser)]
#[command(name = "genmerge")]
#[command(about = "Merge statistical output containers from parallel runs")]
pub struct Cli {
    /// Workspace directory scanned for run sub-directories
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Suppress the progress bar and logging
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Summary output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl Cli {
    /// Load the effective configuration for this invocation.
    pub fn load_config(&self) -> Result<MergeConfig, MergeError> {
        match &self.config {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(&self.workspace),
        }
    }
}

#[derive(Serialize)]
struct RunSummary {
    output: String,
    inputs: Vec<String>,
    skipped: usize,
    completed_at: String,
    #[serde(flatten)]
    report: MergeReport,
}

/// Execute the merge described by the CLI arguments and return the
/// rendered summary.
pub fn run(cli: &Cli) -> Result<String, MergeError> {
    let config = cli.load_config()?;
    config.validate()?;

    let discovered = discover_inputs(&cli.workspace, &config.input_filename)?;
    if discovered.inputs.is_empty() {
        return Err(MergeError::NoInputs);
    }

    let output_path = cli.workspace.join(&config.output_filename);
    let mut output = FileContainer::create(&output_path).map_err(|source| {
        MergeError::OutputCreateFailed {
            path: output_path.clone(),
            source,
        }
    })?;

    let handles: Vec<(String, &dyn ContainerRead)> = discovered
        .inputs
        .iter()
        .map(|(label, container)| (label.clone(), container as &dyn ContainerRead))
        .collect();
    let inputs = InputSet::new(handles)?;

    let mut progress: Box<dyn ProgressSink> = if cli.quiet || cli.format == "json" {
        Box::new(NullProgress)
    } else {
        Box::new(ConsoleProgress::new())
    };
    let report = MergeDriver::new(progress.as_mut()).merge(&inputs, &mut output)?;
    output.flush()?;

    let summary = RunSummary {
        output: output_path.display().to_string(),
        inputs: discovered
            .inputs
            .iter()
            .map(|(label, _)| label.clone())
            .collect(),
        skipped: discovered.skipped,
        completed_at: chrono::Utc::now().to_rfc3339(),
        report,
    };

    if cli.format == "json" {
        serde_json::to_string_pretty(&summary)
            .map_err(|e| MergeError::Config(format!("Failed to render summary: {}", e)))
    } else {
        Ok(render_text_summary(&summary))
    }
}

fn render_text_summary(summary: &RunSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Record kind", "Merged"]);
    table.add_row(vec![
        "Histograms".to_string(),
        summary.report.histograms.to_string(),
    ]);
    table.add_row(vec![
        "Scalars".to_string(),
        summary.report.scalars.to_string(),
    ]);
    table.add_row(vec![
        "Tables".to_string(),
        summary.report.tables.to_string(),
    ]);
    table.add_row(vec![
        "Directories".to_string(),
        summary.report.directories.to_string(),
    ]);
    table.add_row(vec![
        "Opaque copies".to_string(),
        summary.report.opaque.to_string(),
    ]);

    let mut lines = Vec::new();
    lines.push(format!(
        "Merged {} input container(s) into {}",
        summary.inputs.len(),
        summary.output
    ));
    if summary.skipped > 0 {
        lines.push(format!(
            "{}",
            format!("Skipped {} unreadable candidate(s)", summary.skipped).yellow()
        ));
    }
    lines.push(table.to_string());
    if summary.report.warnings > 0 {
        lines.push(format!(
            "{}",
            format!("{} warning(s); see log for details", summary.report.warnings).yellow()
        ));
    }
    lines.push(format!("{}", "Merging completed successfully.".green()));
    lines.join("\n")
}

/// Map an error to the message shown on stderr.
pub fn map_error(error: &MergeError) -> String {
    match error {
        MergeError::NoInputs => {
            "No input containers found for merging. Each run sub-directory must \
             contain the configured input container."
                .to_string()
        }
        other => other.to_string(),
    }
}
