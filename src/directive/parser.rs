use super::{DefaultValue, Directive};
use crate::constants::directives::{DEFAULT, REQUIRED};
use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// Parses the body of a directive tag, e.g. `required A B` or `default A="x"`.
///
/// # Arguments
/// * `source` - The tag as written, used in error messages
/// * `body` - The tag content without delimiters
pub fn parse(source: &str, body: &str) -> Result<Directive> {
    let (keyword, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
    let invalid = |reason: String| Error::DirectiveError { directive: source.to_string(), reason };

    match keyword {
        REQUIRED => {
            let mut names = BTreeSet::new();
            for name in rest.split_whitespace() {
                if !is_identifier(name) {
                    return Err(invalid(format!("'{name}' is not a valid variable name")));
                }
                names.insert(name.to_string());
            }
            if names.is_empty() {
                return Err(invalid("expected at least one variable name".into()));
            }
            Ok(Directive::Required { names })
        }
        DEFAULT => {
            let Some((name, value)) = rest.split_once('=') else {
                return Err(invalid("expected NAME=VALUE".into()));
            };
            let name = name.trim();
            if !is_identifier(name) {
                return Err(invalid(format!("'{name}' is not a valid variable name")));
            }
            let value = parse_value(value.trim()).map_err(invalid)?;
            Ok(Directive::Default { name: name.to_string(), value })
        }
        other => Err(invalid(format!("unknown directive '{other}'"))),
    }
}

fn parse_value(value: &str) -> std::result::Result<DefaultValue, String> {
    if let Some(command) = strip_pair(value, '`') {
        if command.trim().is_empty() {
            return Err("command must not be empty".into());
        }
        return Ok(DefaultValue::Command(command.to_string()));
    }

    let literal = strip_pair(value, '"').or_else(|| strip_pair(value, '\'')).unwrap_or(value);
    Ok(DefaultValue::Literal(literal.to_string()))
}

fn strip_pair(value: &str, quote: char) -> Option<&str> {
    value.strip_prefix(quote)?.strip_suffix(quote)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
