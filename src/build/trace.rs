use std::path::Path;

/// Informational trace events emitted during a build.
///
/// Injected into the builder so tests can substitute a recording
/// implementation; emission never affects control flow.
pub trait Trace {
    /// A page was rendered and written.
    fn page_written(&self, output: &Path, template: &str);

    /// A document without metadata was skipped.
    fn document_skipped(&self, source: &Path);
}

/// The production trace, forwarding to the `tracing` macros.
pub struct LogTrace;

impl Trace for LogTrace {
    fn page_written(&self, output: &Path, template: &str) {
        tracing::info!(output = %output.display(), template, "wrote page");
    }

    fn document_skipped(&self, source: &Path) {
        tracing::debug!(source = %source.display(), "skipped document without metadata");
    }
}
