use super::filters;
use crate::{error::Result, renderer::interface::TemplateRenderer, variables::VariableContext};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

const DEFAULT_TEMPLATE_NAME: &str = "template";

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance with default environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        filters::register(&mut env);

        Self { env }
    }

    /// Makes references to undefined variables a rendering error.
    pub fn strict(mut self, strict: bool) -> Self {
        let behavior =
            if strict { UndefinedBehavior::Strict } else { UndefinedBehavior::default() };
        self.env.set_undefined_behavior(behavior);
        self
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        context: &VariableContext,
        template_name: Option<&str>,
    ) -> Result<String> {
        let name = template_name.unwrap_or(DEFAULT_TEMPLATE_NAME);
        Ok(self.env.render_named_str(name, template, context)?)
    }
}
