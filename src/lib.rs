// src/lib.rs
//! nb2html library — filters Jupyter notebooks so an HTML export shows
//! only markdown text and the outputs of cells marked for display.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ValidationError`
//! - **Configuration** — `ExportConfig`, `CommandLineInput`
//! - **Domain model** — `Notebook`, `Cell`, `CellType`, `CellMetadata`, `SourceText`
//! - **Domain types** — `TagName`
//! - **Filtering** — `filter_notebook`, `should_retain_output`, `FilterSummary`
//! - **Rendering** — `render_with`, `Converter`, `NbconvertConverter`

// Internal modules — must match what's in main.rs
mod config;
mod constants;
mod error;
mod filter;
mod model;
mod pipeline;
mod render;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, EXIT_INPUT_NOT_FOUND, EXIT_RENDER_FAILED};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ExportConfig};

// --- Domain Model ---
pub use crate::model::{
    read_notebook, write_notebook, Cell, CellMetadata, CellType, Notebook, SourceText,
};

// --- Domain Types ---
pub use crate::types::TagName;

// --- Filtering ---
pub use crate::filter::{
    apply_marker_tag, filter_notebook, has_display_marker, should_retain_output, FilterSummary,
};

// --- Rendering ---
pub use crate::render::{
    render_with, Converter, NbconvertConverter, RenderReport, RenderRequest,
};

// --- Pipeline Traits ---
pub use crate::pipeline::{ArtifactRenderer, NotebookFilter, NotebookSource};

// --- Domain Constants ---
pub use crate::constants::{DEFAULT_RETENTION_TAG, DISPLAY_MARKERS};
