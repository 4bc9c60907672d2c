//! Label rendering
//!
//! Evaluates the configured Jinja-style template with a single bound
//! variable, `cable`, and returns the resulting text. Rendering is a pure
//! read of configuration and cable state; all failures propagate to the
//! caller.

mod format;
mod methods;

use std::error::Error as _;
use std::path::PathBuf;

use minijinja::value::Value;
use minijinja::{context, Environment, ErrorKind as TemplateErrorKind, UndefinedBehavior};

use crate::config::Config;
use crate::error::{LabelError, Result};
use crate::model::Cable;

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    // An unguarded attribute path through a null relationship must fail the
    // render, not silently produce an empty segment. Failed lookups on
    // non-objects still yield undefined, so `default(...)` guards recover.
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_unknown_method_callback(methods::call_unknown_method);
    env
}

/// Check that a template compiles, without rendering it.
pub fn check_template(template: &str) -> Result<()> {
    let env = environment();
    env.template_from_str(template).map_err(to_label_error)?;
    Ok(())
}

/// Render a cable label from an explicit template string.
pub fn render_label(cable: &Cable, template: &str) -> Result<String> {
    let env = environment();
    let tmpl = env.template_from_str(template).map_err(to_label_error)?;
    tmpl.render(context! { cable => Value::from_serialize(cable) })
        .map_err(to_label_error)
}

fn to_label_error(err: minijinja::Error) -> LabelError {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    match err.kind() {
        TemplateErrorKind::SyntaxError => LabelError::TemplateSyntax { detail },
        _ => LabelError::TemplateRender { detail },
    }
}

/// Renders labels using the currently configured template.
///
/// The template is resolved again on every render, so changing the
/// configuration takes effect on the next save without a restart.
pub struct LabelRenderer {
    source: TemplateSource,
}

enum TemplateSource {
    /// Read `labels.template` from the config file (or defaults) per render
    ConfigFile(Option<PathBuf>),
    /// Fixed template string, for previews and tests
    Fixed(String),
}

impl LabelRenderer {
    /// Renderer backed by the configuration file at `path` (or the default
    /// location when `None`).
    pub fn from_config_path(path: Option<PathBuf>) -> Self {
        Self {
            source: TemplateSource::ConfigFile(path),
        }
    }

    /// Renderer with a fixed template that ignores configuration.
    pub fn fixed(template: impl Into<String>) -> Self {
        Self {
            source: TemplateSource::Fixed(template.into()),
        }
    }

    /// Resolve the template to use for the next render.
    pub fn template(&self) -> Result<String> {
        match &self.source {
            TemplateSource::Fixed(template) => Ok(template.clone()),
            TemplateSource::ConfigFile(path) => {
                Ok(Config::load_or_default(path.as_deref())?.labels.template)
            }
        }
    }

    /// Render the label for `cable` with the current template.
    pub fn render(&self, cable: &Cable) -> Result<String> {
        render_label(cable, &self.template()?)
    }
}
