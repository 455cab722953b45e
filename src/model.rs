// src/model.rs
//! The notebook document model: an ordered sequence of cells plus a
//! format version marker.
//!
//! Only the fields the filter touches are modeled as typed fields;
//! everything else (cell outputs, notebook metadata, unrecognized keys)
//! is carried as opaque JSON and round-tripped untouched. The two on-disk
//! representations of cell source (one string vs. a list of line strings)
//! are normalized into a single text blob at the ingestion boundary, so
//! no downstream logic branches on representation.

use crate::constants::SUPPORTED_NBFORMAT_MAJOR;
use crate::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// Kind of a notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Code,
    Markdown,
    Raw,
}

impl CellType {
    pub fn is_code(self) -> bool {
        matches!(self, Self::Code)
    }
}

/// Cell source text, normalized to one canonical string.
///
/// nbformat stores source either as a single string or as a sequence of
/// line strings. Both forms are accepted; the sequence form is
/// concatenated without inserting separators (stored lines keep their own
/// trailing newlines). Serialization always emits the single-string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText(String);

#[allow(dead_code)] // Constructors used by the lib crate and tests
impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for SourceText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SourceText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Single(String),
            Lines(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Single(text) => Self(text),
            Repr::Lines(lines) => Self(lines.concat()),
        })
    }
}

/// Cell metadata: the recognized selection fields as typed reads, plus a
/// residual map that round-trips every unrecognized key untouched and in
/// its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Kept as raw JSON: only an exact boolean `true` requests retention,
    /// but whatever value was on disk is preserved on the way back out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_output: Option<Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl CellMetadata {
    /// Whether `tags` contains the given tag. An absent set is treated as
    /// empty.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_deref()
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }

    /// True only when the flag is exactly the JSON boolean `true`; truthy
    /// strings and numbers do not count.
    pub fn export_output_requested(&self) -> bool {
        matches!(self.export_output, Some(Value::Bool(true)))
    }

    /// Ensures `tag` is present, creating the set if absent. Existing tag
    /// order is preserved and no duplicate is introduced.
    pub fn ensure_tag(&mut self, tag: &str) {
        let tags = self.tags.get_or_insert_with(Vec::new);
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
}

/// One unit of the document: narrative text or executable content with
/// captured results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,

    #[serde(default)]
    pub source: SourceText,

    #[serde(default)]
    pub metadata: CellMetadata,

    /// Output records, meaningful only for code cells. Opaque to this
    /// tool; retained cells pass them through byte-for-byte.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Value>>,

    /// Code cells keep this key on disk even when unset (`null`), so
    /// present-but-null and absent are distinguished.
    #[serde(
        default,
        deserialize_with = "deserialize_nullable_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub execution_count: Option<Option<i64>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A field that is present-with-`null` deserializes to `Some(None)`;
/// serde's `default` covers the absent case with `None`.
fn deserialize_nullable_count<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

impl Cell {
    pub fn is_code(&self) -> bool {
        self.cell_type.is_code()
    }

    /// Clears captured results: outputs become an empty sequence and the
    /// execution count becomes `null`.
    pub fn clear_outputs(&mut self) {
        self.outputs = Some(Vec::new());
        self.execution_count = Some(None);
    }

    /// Ingestion normalization for code cells: guarantee the `outputs`
    /// and `execution_count` keys exist so serialization matches the
    /// nbformat v4 shape.
    fn normalize(&mut self) {
        if self.is_code() {
            if self.outputs.is_none() {
                self.outputs = Some(Vec::new());
            }
            if self.execution_count.is_none() {
                self.execution_count = Some(None);
            }
        }
    }
}

#[allow(dead_code)] // Fixture constructors used by the lib crate and tests
impl Cell {
    pub fn code(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellType::Code,
            source: SourceText::new(source),
            metadata: CellMetadata::default(),
            outputs: Some(Vec::new()),
            execution_count: Some(None),
            extra: IndexMap::new(),
        }
    }

    pub fn markdown(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellType::Markdown,
            source: SourceText::new(source),
            metadata: CellMetadata::default(),
            outputs: None,
            execution_count: None,
            extra: IndexMap::new(),
        }
    }

    pub fn raw(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellType::Raw,
            source: SourceText::new(source),
            metadata: CellMetadata::default(),
            outputs: None,
            execution_count: None,
            extra: IndexMap::new(),
        }
    }

    pub fn with_outputs(mut self, outputs: Vec<Value>) -> Self {
        self.outputs = Some(outputs);
        self
    }

    pub fn with_execution_count(mut self, count: i64) -> Self {
        self.execution_count = Some(Some(count));
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.metadata.ensure_tag(tag);
        self
    }
}

/// The document: an ordered sequence of cells plus the format version
/// marker. Owned exclusively by the exporter for the duration of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,

    #[serde(default)]
    pub metadata: IndexMap<String, Value>,

    #[serde(default = "default_nbformat")]
    pub nbformat: u32,

    #[serde(default)]
    pub nbformat_minor: u32,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

fn default_nbformat() -> u32 {
    SUPPORTED_NBFORMAT_MAJOR
}

impl Default for Notebook {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            metadata: IndexMap::new(),
            nbformat: SUPPORTED_NBFORMAT_MAJOR,
            nbformat_minor: 5,
            extra: IndexMap::new(),
        }
    }
}

/// Reads and parses a notebook file, normalizing every cell at the
/// ingestion boundary.
///
/// A missing input file is a precondition failure reported before any
/// other work is attempted.
pub fn read_notebook(path: &Path) -> Result<Notebook, AppError> {
    if !path.is_file() {
        return Err(AppError::NotebookNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    let mut notebook: Notebook =
        serde_json::from_slice(&bytes).map_err(|source| AppError::NotebookParse {
            path: path.to_path_buf(),
            source,
        })?;

    if notebook.nbformat != SUPPORTED_NBFORMAT_MAJOR {
        log::warn!(
            "Notebook {} reports nbformat {} (expected {}); processing anyway",
            path.display(),
            notebook.nbformat,
            SUPPORTED_NBFORMAT_MAJOR
        );
    }

    for cell in &mut notebook.cells {
        cell.normalize();
    }

    Ok(notebook)
}

/// Serializes the notebook in the format the rendering collaborator
/// expects.
pub fn write_notebook<W: std::io::Write>(notebook: &Notebook, writer: W) -> Result<(), AppError> {
    serde_json::to_writer(writer, notebook)?;
    Ok(())
}
