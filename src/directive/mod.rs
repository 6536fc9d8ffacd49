//! Directive preprocessing for templates
//!
//! Templates may declare their variables with two statement tags that are
//! consumed before rendering:
//! - `{% required NAME1 NAME2 %}` declares variables that must be set
//! - `{% default NAME=VALUE %}` declares a fallback value; a value wrapped in
//!   backticks is a command whose output becomes the value
//!
//! Extraction happens in two phases: `scanner` locates directive tags and
//! `parser` turns each tag into a [`Directive`].

pub mod extractor;
pub mod parser;
pub mod scanner;

use std::collections::{BTreeMap, BTreeSet};

pub use extractor::{DirectiveExtractor, Extraction};

/// Names that must resolve to a non-blank value.
pub type RequiredSet = BTreeSet<String>;

/// Resolved default values by variable name.
pub type DefaultsMap = BTreeMap<String, String>;

/// A parsed directive tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Required { names: BTreeSet<String> },
    Default { name: String, value: DefaultValue },
}

/// Right-hand side of a `default` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Used as written, with surrounding quotes removed.
    Literal(String),
    /// Executed during extraction; its trimmed stdout is the value.
    Command(String),
}
