mod builder;
mod document;
mod render;
mod source;
mod trace;

pub use builder::{BuildError, BuildResult, Builder};
pub use document::{DocumentError, SourceDocument};
pub use render::{RenderError, Renderer};
pub use source::{SourceError, SourceScan};
pub use trace::{LogTrace, Trace};
