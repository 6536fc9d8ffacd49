use super::{file::kind, is_blank, EnvSnapshot, VariableContext, VariableFile};
use crate::constants::{DEFAULT_ENV_PREFIX, DEFAULT_VARS_ENV};
use crate::directive::DefaultsMap;
use crate::error::{Error, Result};
use serde_json::Value;

/// Names of the environment variables the resolver reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Variable holding a JSON object of overrides.
    pub vars_env: String,
    /// Prefix of variables contributing typed values.
    pub env_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { vars_env: DEFAULT_VARS_ENV.to_string(), env_prefix: DEFAULT_ENV_PREFIX.to_string() }
    }
}

/// Merges all variable sources into one flat context.
///
/// Sources, lowest to highest precedence:
/// 1. every environment variable, as a string
/// 2. variable files, in the order given
/// 3. the JSON object in the override variable
/// 4. prefixed environment variables, prefix stripped, values parsed as JSON when possible
///
/// Defaults are applied last and only fill keys that are missing or blank.
pub struct VariableResolver<'a> {
    config: &'a ResolverConfig,
    env: &'a EnvSnapshot,
}

impl<'a> VariableResolver<'a> {
    pub fn new(config: &'a ResolverConfig, env: &'a EnvSnapshot) -> Self {
        Self { config, env }
    }

    pub fn resolve(&self, files: &[VariableFile], defaults: &DefaultsMap) -> Result<VariableContext> {
        let mut context: VariableContext =
            self.env.iter().map(|(name, value)| (name.to_string(), Value::from(value))).collect();

        for file in files {
            log::debug!("Merging {} variables from {}", file.values.len(), file.path.display());
            context.extend(file.values.clone());
        }

        context.extend(self.overrides()?);

        for (key, raw) in self.env.with_prefix(&self.config.env_prefix) {
            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw));
            context.insert(key.to_string(), value);
        }

        for (name, value) in defaults {
            if context.get(name).is_none_or(is_blank) {
                log::debug!("Using default for '{name}'");
                context.insert(name.clone(), Value::from(value.as_str()));
            }
        }

        Ok(context)
    }

    fn overrides(&self) -> Result<serde_json::Map<String, Value>> {
        let var = &self.config.vars_env;
        let raw = match self.env.get(var) {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(serde_json::Map::new()),
        };

        let parse_error = |reason: String| Error::OverrideParseError { var: var.clone(), reason };
        match serde_json::from_str::<Value>(raw).map_err(|e| parse_error(e.to_string()))? {
            Value::Object(map) => Ok(map),
            other => Err(parse_error(format!("expected an object, found {}", kind(&other)))),
        }
    }
}
