use std::path::Path;

use minijinja::{Environment, ErrorKind, UndefinedBehavior, path_loader};
use serde_json::{Map, Value};

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// The template renderer, wrapping a minijinja environment.
///
/// Templates are loaded by name from the layout directory. Lines holding only
/// a control statement are trimmed out of the output (`trim_blocks` +
/// `lstrip_blocks`), and unresolved variable references render as empty
/// rather than failing.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Create a new renderer loading templates from the given directory.
    ///
    /// Templates are resolved lazily, so a missing directory only surfaces
    /// once a template is requested.
    pub fn new(layout_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(layout_dir.to_path_buf()));
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Lenient);

        Self { env }
    }

    /// Render the named template with the given context.
    pub fn render(&self, name: &str, context: &Map<String, Value>) -> Result<String, RenderError> {
        let template = self.env.get_template(name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                RenderError::TemplateNotFound(name.to_string())
            } else {
                RenderError::Template(e)
            }
        })?;

        Ok(template.render(context)?)
    }
}
