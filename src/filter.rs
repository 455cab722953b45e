// src/filter.rs
//! The selective filter: decides per code cell whether captured results
//! survive the export, then strips source text from every code cell.
//!
//! Three conventions flag a cell for display — a metadata tag, the
//! `export_output` boolean flag, and a marker comment on the first
//! non-blank source line. The normalization pass makes the comment
//! convention converge on the tag convention before the predicate runs,
//! so a cell flagged only by its comment still ends up carrying the tag.

use crate::constants::DISPLAY_MARKERS;
use crate::model::{Cell, Notebook};
use crate::types::TagName;

/// What one filter pass did, for completion reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub code_cells: usize,
    pub retained: usize,
    pub cleared: usize,
}

/// Returns the first non-blank line of a source blob, trimmed.
fn first_nonblank_line(source: &str) -> Option<&str> {
    source.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Whether the first non-blank line carries a display marker.
///
/// Matching is case-insensitive and prefix-based, so trailing text on the
/// marker line is allowed. Lines after the first non-blank one are never
/// inspected.
pub fn has_display_marker(source: &str) -> bool {
    first_nonblank_line(source).is_some_and(|line| {
        let line = line.to_lowercase();
        DISPLAY_MARKERS.iter().any(|marker| line.starts_with(marker))
    })
}

/// The retention predicate: whether a code cell's outputs survive the
/// export. First match wins.
pub fn should_retain_output(cell: &Cell, tag: &TagName) -> bool {
    if cell.metadata.has_tag(tag.as_str()) {
        return true;
    }
    if cell.metadata.export_output_requested() {
        return true;
    }
    has_display_marker(cell.source.as_str())
}

/// Tag normalization: a cell whose first non-blank line carries a display
/// marker gets the tag written into its metadata, so both flagging
/// conventions share one on-disk representation.
pub fn apply_marker_tag(cell: &mut Cell, tag: &TagName) {
    if has_display_marker(cell.source.as_str()) {
        cell.metadata.ensure_tag(tag.as_str());
    }
}

/// Filters the notebook in place: a single pass, in document order.
///
/// For each code cell, tag normalization runs first, then the retention
/// predicate is evaluated against the just-updated metadata and the
/// original source. Losing cells have outputs and execution count
/// cleared. Source text is erased from every code cell regardless of the
/// outcome; non-code cells pass through untouched. The pass is
/// idempotent: running it on an already-filtered document changes
/// nothing.
pub fn filter_notebook(notebook: &mut Notebook, tag: &TagName) -> FilterSummary {
    let mut summary = FilterSummary::default();

    for cell in &mut notebook.cells {
        if !cell.is_code() {
            continue;
        }
        summary.code_cells += 1;

        apply_marker_tag(cell, tag);
        if should_retain_output(cell, tag) {
            summary.retained += 1;
        } else {
            cell.clear_outputs();
            summary.cleared += 1;
        }

        cell.source.clear();
    }

    summary
}
