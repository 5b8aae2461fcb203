use std::path::PathBuf;

use serde_json::Value;

use super::document::{DocumentError, SourceDocument};
use super::render::{RenderError, Renderer};
use super::source::{SourceError, SourceScan};
use super::trace::{LogTrace, Trace};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("{path} has metadata but no \"layout\" key")]
    MissingLayout { path: PathBuf },

    #[error("{path}: \"layout\" must be a string")]
    LayoutNotAString { path: PathBuf },

    #[error("{path}: template {template:?} not found")]
    TemplateNotFound { path: PathBuf, template: String },

    #[error("failed to render {path}: {source}")]
    Render {
        path: PathBuf,
        source: RenderError,
    },

    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    /// Pages rendered and written
    pub pages: usize,
    /// Documents skipped for lack of metadata
    pub skipped: usize,
}

/// Orchestrates one site build: scan, read, render, write.
///
/// Each `build` call is independent; no state persists between invocations,
/// and identical inputs yield identical outputs.
pub struct Builder {
    input_dir: PathBuf,
    output_dir: PathBuf,
    trace: Box<dyn Trace>,
}

impl Builder {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            trace: Box::new(LogTrace),
        }
    }

    /// Replace the trace emitter, mainly for tests.
    pub fn with_trace(mut self, trace: Box<dyn Trace>) -> Self {
        self.trace = trace;
        self
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // The one top-level fatal precondition: the output directory must
        // exist before any document is processed.
        std::fs::create_dir_all(&self.output_dir).map_err(|source| {
            BuildError::CreateOutputDir {
                path: self.output_dir.clone(),
                source,
            }
        })?;

        let renderer = Renderer::new(&self.input_dir.join("layout"));

        let mut pages = 0;
        let mut skipped = 0;

        for entry in SourceScan::new(&self.input_dir)? {
            let SourceDocument {
                path,
                metadata,
                content,
            } = SourceDocument::read(&entry?)?;

            // No metadata marks a non-content file (a partial or draft)
            let Some(mut context) = metadata else {
                self.trace.document_skipped(&path);
                skipped += 1;
                continue;
            };

            let template = match context.get("layout") {
                Some(Value::String(name)) => name.clone(),
                Some(_) => return Err(BuildError::LayoutNotAString { path }),
                None => return Err(BuildError::MissingLayout { path }),
            };

            // The document body always wins over a metadata "content" key
            context.insert("content".to_string(), Value::String(content));

            let html = renderer.render(&template, &context).map_err(|e| match e {
                RenderError::TemplateNotFound(template) => BuildError::TemplateNotFound {
                    path: path.clone(),
                    template,
                },
                source => BuildError::Render {
                    path: path.clone(),
                    source,
                },
            })?;

            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            let output_path = self.output_dir.join(format!("{stem}.html"));
            std::fs::write(&output_path, html).map_err(|source| BuildError::WriteOutput {
                path: output_path.clone(),
                source,
            })?;

            self.trace.page_written(&output_path, &template);
            pages += 1;
        }

        Ok(BuildResult {
            output_dir: self.output_dir.clone(),
            pages,
            skipped,
        })
    }
}
