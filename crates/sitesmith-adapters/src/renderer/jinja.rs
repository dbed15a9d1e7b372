//! [`TemplateEngine`] backed by minijinja.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use tracing::instrument;

use sitesmith_core::{
    application::{ApplicationError, ports::TemplateEngine},
    domain::RenderContext,
    error::SitesmithResult,
};

/// Renders with strict undefined handling: a variable missing from the
/// context fails the render instead of printing as empty. Blocks swallow
/// their own line (`trim_blocks` + `lstrip_blocks`) and the final newline is
/// kept, so templates read like the files they produce.
///
/// Jekyll's own Liquid tags share the `{{ }}`/`{% %}` syntax and must sit
/// inside `{% raw %}` blocks in bundled templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniJinjaEngine;

impl MiniJinjaEngine {
    pub fn new() -> Self {
        Self
    }

    fn environment<'a>() -> Environment<'a> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env
    }
}

impl TemplateEngine for MiniJinjaEngine {
    #[instrument(skip(self, text, context))]
    fn render(&self, name: &str, text: &str, context: &RenderContext) -> SitesmithResult<String> {
        let failed = |e: minijinja::Error| ApplicationError::RenderingFailed {
            template: name.to_string(),
            reason: format!("{e:#}"),
        };

        let env = Self::environment();
        let template = env.template_from_named_str(name, text).map_err(failed)?;
        Ok(template.render(context).map_err(failed)?)
    }
}
