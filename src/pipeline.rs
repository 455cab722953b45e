// src/pipeline.rs
//! Pipeline capability traits — abstract the three stages of the export
//! pipeline: load → filter → render.
//!
//! Each trait describes a single capability, enabling testing each stage
//! in isolation.

use crate::error::AppError;
use crate::filter::FilterSummary;
use crate::model::Notebook;
use crate::render::RenderReport;
use std::path::Path;

/// Reads and parses a notebook document from disk.
pub trait NotebookSource {
    fn load(&self, path: &Path) -> Result<Notebook, AppError>;
}

/// Applies the selective filter to a notebook in place.
pub trait NotebookFilter {
    fn filter(&self, notebook: &mut Notebook) -> FilterSummary;
}

/// Renders a filtered notebook into the final viewable artifact.
pub trait ArtifactRenderer {
    fn render(&self, notebook: &Notebook) -> Result<RenderReport, AppError>;
}
