// src/config.rs
use crate::constants::DEFAULT_RETENTION_TAG;
use crate::error::AppError;
use crate::render::RenderRequest;
use crate::types::TagName;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Path to the input .ipynb file
    #[arg(short = 'n', long)]
    pub notebook: String,

    /// Path to the output .html file
    #[arg(short = 'o', long)]
    pub output: String,

    /// Cell tag that keeps outputs in the export
    #[arg(short = 't', long, default_value = DEFAULT_RETENTION_TAG)]
    pub tag: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved export configuration — validated and ready to drive all
/// three stages.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub notebook_path: PathBuf,
    pub output_path: PathBuf,
    pub tag: TagName,
    #[allow(dead_code)] // Logging is configured from the CLI flag before resolve
    pub verbose: bool,
}

impl ExportConfig {
    /// Resolves a complete export configuration from CLI input.
    ///
    /// Paths are absolutized up front so the later stages (and the
    /// renderer child process) are immune to working-directory changes.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let tag = TagName::new(cli.tag)?;
        let notebook_path = absolutize(Path::new(&cli.notebook))?;
        let output_path = absolutize(Path::new(&cli.output))?;

        Ok(ExportConfig {
            notebook_path,
            output_path,
            tag,
            verbose: cli.verbose,
        })
    }

    /// Derives where the renderer should write: the output file's
    /// directory plus its basename stripped of the extension (the
    /// renderer appends its own `.html`).
    pub fn render_request(&self) -> RenderRequest {
        let output_dir = self
            .output_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let basename = self
            .output_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "notebook".to_string());

        RenderRequest {
            output_dir,
            basename,
        }
    }
}

/// Absolutizes a path against the current working directory without
/// requiring it to exist yet.
fn absolutize(path: &Path) -> Result<PathBuf, AppError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLineInput {
        CommandLineInput::try_parse_from(args.iter().copied()).expect("arguments should parse")
    }

    #[test]
    fn tag_defaults_to_export_output() {
        let cli = parse(&["nb2html", "-n", "in.ipynb", "-o", "out.html"]);
        assert_eq!(cli.tag, DEFAULT_RETENTION_TAG);

        let cli = parse(&["nb2html", "-n", "in.ipynb", "-o", "out.html", "-t", "keep"]);
        assert_eq!(cli.tag, "keep");
    }

    #[test]
    fn missing_required_arguments_are_rejected() {
        assert!(CommandLineInput::try_parse_from(["nb2html", "-n", "in.ipynb"]).is_err());
        assert!(CommandLineInput::try_parse_from(["nb2html", "-o", "out.html"]).is_err());
    }

    #[test]
    fn resolve_rejects_invalid_tags() {
        let cli = parse(&["nb2html", "-n", "in.ipynb", "-o", "out.html", "-t", ""]);
        assert!(ExportConfig::resolve(cli).is_err());
    }

    #[test]
    fn resolve_absolutizes_relative_paths() {
        let cli = parse(&["nb2html", "-n", "in.ipynb", "-o", "out/report.html"]);
        let config = ExportConfig::resolve(cli).unwrap();
        assert!(config.notebook_path.is_absolute());
        assert!(config.output_path.is_absolute());
    }

    #[test]
    fn render_request_splits_dir_and_basename() {
        let cli = parse(&["nb2html", "-n", "/data/in.ipynb", "-o", "/reports/final.html"]);
        let config = ExportConfig::resolve(cli).unwrap();
        let request = config.render_request();
        assert_eq!(request.output_dir, PathBuf::from("/reports"));
        assert_eq!(request.basename, "final");
        assert_eq!(
            request.artifact_path(),
            PathBuf::from("/reports/final.html")
        );
    }
}
