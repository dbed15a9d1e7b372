//! Renders bundled templates against the run's [`RenderContext`].

use tracing::debug;

use crate::{
    application::{ApplicationError, ports::TemplateEngine},
    domain::{RenderContext, SourceRef},
    error::SitesmithResult,
};

/// Binds a [`TemplateEngine`] to one run's context.
///
/// Output depends only on the template text and the context, and the
/// context carries the run date, so two composers built from equal
/// inputs produce identical bytes.
pub struct TemplateComposer<'a> {
    engine: &'a dyn TemplateEngine,
    context: &'a RenderContext,
}

impl<'a> TemplateComposer<'a> {
    pub fn new(engine: &'a dyn TemplateEngine, context: &'a RenderContext) -> Self {
        Self { engine, context }
    }

    pub fn context(&self) -> &RenderContext {
        self.context
    }

    /// Render the template `source` whose raw bytes are `bytes`.
    pub fn render(&self, source: &SourceRef, bytes: &[u8]) -> SitesmithResult<Vec<u8>> {
        let name = source.to_string();
        let text = std::str::from_utf8(bytes).map_err(|e| ApplicationError::RenderingFailed {
            template: name.clone(),
            reason: format!("template is not UTF-8: {e}"),
        })?;

        debug!(template = %name, "Rendering template");
        let rendered = self.engine.render(&name, text, self.context)?;
        Ok(rendered.into_bytes())
    }
}
