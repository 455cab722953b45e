// src/main.rs

// Modules defined in the crate
mod config;
mod constants;
mod error;
mod filter;
mod model;
mod pipeline;
mod render;
mod types;

// Specific imports
use crate::config::{CommandLineInput, ExportConfig};
use crate::error::AppError;
use crate::filter::FilterSummary;
use crate::model::Notebook;
use crate::pipeline::{ArtifactRenderer, NotebookFilter, NotebookSource};
use crate::render::{NbconvertConverter, RenderReport};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("nb2html.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the three-stage export pipeline: load → filter → render.
fn execute_pipeline(config: &ExportConfig) -> Result<(), AppError> {
    let pipeline = SelectiveExport::new(config);

    let mut notebook = pipeline.load(&config.notebook_path)?;
    let summary = pipeline.filter(&mut notebook);

    println!("Converting notebook (outputs filtered) to HTML...");
    let report = pipeline.render(&notebook)?;

    pipeline.report_completion(&summary, &report);

    Ok(())
}

/// Orchestrates loading, filtering, and rendering of one notebook.
struct SelectiveExport<'a> {
    config: &'a ExportConfig,
}

impl<'a> SelectiveExport<'a> {
    fn new(config: &'a ExportConfig) -> Self {
        Self { config }
    }

    /// Reports completion to the user with filter stats and the artifact
    /// location.
    fn report_completion(&self, summary: &FilterSummary, report: &RenderReport) {
        if summary.code_cells > 0 {
            println!(
                "Kept outputs for {} of {} code cells (tag: {}).",
                summary.retained, summary.code_cells, self.config.tag
            );
        }
        println!("✓ Export completed: {}", report.artifact.display());
        log::info!("Render finished in {}ms", report.duration_ms);
    }
}

impl NotebookSource for SelectiveExport<'_> {
    fn load(&self, path: &Path) -> Result<Notebook, AppError> {
        log::info!("Reading notebook {}", path.display());
        let notebook = model::read_notebook(path)?;
        log::info!("Loaded {} cells", notebook.cells.len());
        Ok(notebook)
    }
}

impl NotebookFilter for SelectiveExport<'_> {
    fn filter(&self, notebook: &mut Notebook) -> FilterSummary {
        let summary = filter::filter_notebook(notebook, &self.config.tag);
        log::info!(
            "Filter pass: {} code cells, {} retained, {} cleared",
            summary.code_cells,
            summary.retained,
            summary.cleared
        );
        summary
    }
}

impl ArtifactRenderer for SelectiveExport<'_> {
    fn render(&self, notebook: &Notebook) -> Result<RenderReport, AppError> {
        render::render_with(
            &NbconvertConverter::new(),
            notebook,
            &self.config.render_request(),
        )
    }
}

fn main() -> ExitCode {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Error: could not initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match ExportConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    match execute_pipeline(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
