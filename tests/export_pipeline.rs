// tests/export_pipeline.rs
//! End-to-end export: filter → stage → convert → cleanup, with the
//! conversion step faked so the suite runs without a Jupyter install.

use nb2html::{
    filter_notebook, render_with, AppError, Cell, Converter, NbconvertConverter, Notebook,
    RenderRequest, TagName, DEFAULT_RETENTION_TAG, EXIT_RENDER_FAILED,
};
use serde_json::json;
use std::cell::RefCell;
use std::fs;
use std::path::Path;

/// Fake renderer: records the staged notebook exactly as nbconvert would
/// see it and writes a placeholder artifact at the requested location.
#[derive(Default)]
struct RecordingConverter {
    seen: RefCell<Option<String>>,
}

impl Converter for RecordingConverter {
    fn convert(&self, notebook_path: &Path, request: &RenderRequest) -> Result<(), AppError> {
        let staged = fs::read_to_string(notebook_path)?;
        *self.seen.borrow_mut() = Some(staged);
        fs::write(request.artifact_path(), "<html><body>ok</body></html>")?;
        Ok(())
    }
}

fn default_tag() -> TagName {
    TagName::new(DEFAULT_RETENTION_TAG).unwrap()
}

fn two_cell_fixture() -> Notebook {
    Notebook {
        cells: vec![
            Cell::markdown("Title"),
            Cell::code("answer()")
                .with_tag("export_output")
                .with_outputs(vec![json!({
                    "output_type": "execute_result",
                    "data": {"text/plain": ["42"]}
                })])
                .with_execution_count(1),
            Cell::code("secret()")
                .with_outputs(vec![json!({
                    "output_type": "stream",
                    "name": "stdout",
                    "text": ["hidden"]
                })])
                .with_execution_count(2),
        ],
        ..Default::default()
    }
}

#[test]
fn end_to_end_export_produces_artifact_and_filtered_intermediate() {
    let dir = tempfile::tempdir().unwrap();
    let request = RenderRequest {
        output_dir: dir.path().to_path_buf(),
        basename: "informe".to_string(),
    };

    let mut notebook = two_cell_fixture();
    filter_notebook(&mut notebook, &default_tag());

    let converter = RecordingConverter::default();
    let report = render_with(&converter, &notebook, &request).unwrap();

    // The artifact landed where the caller asked.
    assert_eq!(report.artifact, dir.path().join("informe.html"));
    assert!(report.artifact.is_file());

    // The staged copy the renderer consumed was already filtered.
    let seen = converter.seen.borrow();
    let staged: Notebook = serde_json::from_str(seen.as_deref().unwrap()).unwrap();
    assert_eq!(staged.cells[0].source.as_str(), "Title");
    assert_eq!(
        staged.cells[1].outputs.as_deref().unwrap()[0]["data"]["text/plain"],
        json!(["42"])
    );
    assert!(staged.cells[1].source.is_empty());
    assert_eq!(staged.cells[2].outputs, Some(Vec::new()));
    assert_eq!(staged.cells[2].execution_count, Some(None));
    assert!(staged.cells[2].source.is_empty());

    // The intermediate file's lifetime ended with the export step.
    assert!(!report.intermediate.exists());
}

#[test]
fn successful_render_removes_intermediate() {
    // `true` exits 0 while ignoring the nbconvert-style arguments.
    let converter = NbconvertConverter::with_program("true");
    let dir = tempfile::tempdir().unwrap();
    let request = RenderRequest {
        output_dir: dir.path().to_path_buf(),
        basename: "out".to_string(),
    };

    let report = render_with(&converter, &Notebook::default(), &request).unwrap();
    assert!(!report.intermediate.exists());
}

#[test]
fn renderer_failure_is_propagated_with_delegation_exit_code() {
    let converter = NbconvertConverter::with_program("false");
    let dir = tempfile::tempdir().unwrap();
    let request = RenderRequest {
        output_dir: dir.path().to_path_buf(),
        basename: "out".to_string(),
    };

    let err = render_with(&converter, &Notebook::default(), &request).unwrap_err();
    assert!(matches!(err, AppError::RenderFailed { .. }));
    assert_eq!(err.exit_code(), EXIT_RENDER_FAILED);
}

#[test]
fn unlaunchable_renderer_is_a_delegation_failure() {
    let converter = NbconvertConverter::with_program("nb2html-no-such-renderer");
    let dir = tempfile::tempdir().unwrap();
    let request = RenderRequest {
        output_dir: dir.path().to_path_buf(),
        basename: "out".to_string(),
    };

    let err = render_with(&converter, &Notebook::default(), &request).unwrap_err();
    assert!(matches!(err, AppError::RendererLaunch { .. }));
    assert_eq!(err.exit_code(), EXIT_RENDER_FAILED);
}

#[test]
fn failing_converter_still_gets_a_cleaned_up_intermediate() {
    // A fake that records the staged path and then fails lets us observe
    // cleanup on the failure path.
    struct FailingConverter {
        staged_path: RefCell<Option<std::path::PathBuf>>,
    }

    impl Converter for FailingConverter {
        fn convert(&self, notebook_path: &Path, _request: &RenderRequest) -> Result<(), AppError> {
            *self.staged_path.borrow_mut() = Some(notebook_path.to_path_buf());
            Err(AppError::RenderFailed {
                status: Some(1),
                detail: "synthetic failure".to_string(),
            })
        }
    }

    let converter = FailingConverter {
        staged_path: RefCell::new(None),
    };
    let dir = tempfile::tempdir().unwrap();
    let request = RenderRequest {
        output_dir: dir.path().to_path_buf(),
        basename: "out".to_string(),
    };

    let err = render_with(&converter, &Notebook::default(), &request).unwrap_err();
    assert!(matches!(err, AppError::RenderFailed { .. }));

    let staged = converter.staged_path.borrow().clone().unwrap();
    assert!(!staged.exists());
}
