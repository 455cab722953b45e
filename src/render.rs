// src/render.rs
//! Export delegation: stages the filtered notebook in a scoped temporary
//! file and hands it to the external renderer.
//!
//! This module is the only place where child processes are spawned and
//! the only place the intermediate file exists. The intermediate's
//! lifetime is exactly bounded by the export step: the scoped temp file
//! is removed on every exit path, including renderer failure.

use crate::constants::{
    INTERMEDIATE_PREFIX, INTERMEDIATE_SUFFIX, RENDERED_FORMAT, RENDERER_PROGRAM,
    RENDERER_SUBCOMMAND,
};
use crate::error::AppError;
use crate::model::{write_notebook, Notebook};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

/// Where the rendered artifact should land: a destination directory and
/// a base filename (the renderer appends its own extension).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub output_dir: PathBuf,
    pub basename: String,
}

impl RenderRequest {
    /// Path of the artifact the renderer will produce.
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.basename, RENDERED_FORMAT))
    }
}

/// Result of a completed render.
#[derive(Debug, Clone)]
pub struct RenderReport {
    pub artifact: PathBuf,
    /// Where the filtered copy was staged. Already removed by the time
    /// the report exists; kept for logging and tests.
    #[allow(dead_code)] // Read by tests
    pub intermediate: PathBuf,
    pub duration_ms: u64,
}

/// The invocable conversion step the export delegates to. Production
/// code shells out to nbconvert; tests substitute a fake.
pub trait Converter {
    fn convert(&self, notebook_path: &Path, request: &RenderRequest) -> Result<(), AppError>;
}

/// Converts via `jupyter nbconvert`, blocking until the child process
/// completes or fails. No retry: a renderer failure is terminal.
#[derive(Debug, Clone)]
pub struct NbconvertConverter {
    program: String,
}

impl Default for NbconvertConverter {
    fn default() -> Self {
        Self {
            program: RENDERER_PROGRAM.to_string(),
        }
    }
}

#[allow(dead_code)] // with_program used by tests
impl NbconvertConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute the renderer program, so tests can run without a
    /// Jupyter install.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Converter for NbconvertConverter {
    fn convert(&self, notebook_path: &Path, request: &RenderRequest) -> Result<(), AppError> {
        log::info!(
            "Invoking {} {} on {}",
            self.program,
            RENDERER_SUBCOMMAND,
            notebook_path.display()
        );

        let output = Command::new(&self.program)
            .arg(RENDERER_SUBCOMMAND)
            .args(["--to", RENDERED_FORMAT, "--output", &request.basename])
            .arg("--output-dir")
            .arg(&request.output_dir)
            .arg(notebook_path)
            .output()
            .map_err(|source| AppError::RendererLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if detail.is_empty() {
                "no diagnostic output".to_string()
            } else {
                detail
            };
            return Err(AppError::RenderFailed {
                status: output.status.code(),
                detail,
            });
        }

        Ok(())
    }
}

/// Stages the notebook in a uniquely named temporary file and runs the
/// converter against it.
///
/// The staged copy is removed once the converter returns, whether it
/// succeeded or not; if removal itself fails (e.g. the file is already
/// gone) that is logged, never fatal.
pub fn render_with<C: Converter>(
    converter: &C,
    notebook: &Notebook,
    request: &RenderRequest,
) -> Result<RenderReport, AppError> {
    let start = Instant::now();

    let staged = tempfile::Builder::new()
        .prefix(INTERMEDIATE_PREFIX)
        .suffix(INTERMEDIATE_SUFFIX)
        .tempfile()?;
    let intermediate = staged.path().to_path_buf();

    write_notebook(notebook, staged.as_file())?;
    log::debug!("Filtered notebook staged at {}", intermediate.display());

    let outcome = converter.convert(&intermediate, request);

    if let Err(e) = staged.close() {
        log::warn!(
            "Could not remove intermediate notebook {}: {}",
            intermediate.display(),
            e
        );
    }

    outcome?;

    Ok(RenderReport {
        artifact: request.artifact_path(),
        intermediate,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
