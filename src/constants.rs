// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of
//! how the exporter operates: which tag selects cells, which comment
//! markers it honors, and how it hands off to the renderer.

// ---------------------------------------------------------------------------
// Cell selection
// ---------------------------------------------------------------------------

/// The tag that keeps a code cell's outputs in the export when no tag is
/// given on the command line. The same name doubles as a boolean metadata
/// flag (`"export_output": true`).
pub const DEFAULT_RETENTION_TAG: &str = "export_output";

/// Marker comments that flag a cell for display when placed on its first
/// non-blank line.
///
/// `#mostar` is a recognized misspelling of `#mostrar` that shipped in
/// real notebooks; both are treated identically. Matching is
/// case-insensitive and only against the first non-blank line.
pub const DISPLAY_MARKERS: [&str; 2] = ["#mostrar", "#mostar"];

// ---------------------------------------------------------------------------
// Notebook format boundaries
// ---------------------------------------------------------------------------

/// The nbformat major version this tool understands.
///
/// Documents reporting a different major version are still processed
/// (the fields we touch are stable), but a warning is logged.
pub const SUPPORTED_NBFORMAT_MAJOR: u32 = 4;

// ---------------------------------------------------------------------------
// Renderer handoff
// ---------------------------------------------------------------------------

/// Program invoked for the rendering step. `jupyter nbconvert` is the same
/// conversion surface as `python -m nbconvert`.
pub const RENDERER_PROGRAM: &str = "jupyter";

/// Subcommand passed to [`RENDERER_PROGRAM`].
pub const RENDERER_SUBCOMMAND: &str = "nbconvert";

/// Target format requested from the renderer.
pub const RENDERED_FORMAT: &str = "html";

/// Filename prefix for the intermediate filtered notebook staged in the
/// OS temp dir.
pub const INTERMEDIATE_PREFIX: &str = "nb2html_";

/// Filename suffix for the intermediate notebook. nbconvert dispatches on
/// the extension, so the staged copy must keep it.
pub const INTERMEDIATE_SUFFIX: &str = ".ipynb";
