//! render is a command-line Jinja template renderer.
//!
//! Templates declare the variables they need with `{% required %}` and
//! `{% default %}` directives. Variables are merged from the environment,
//! JSON or YAML files and a JSON override variable before rendering.

/// Handles argument parsing and runs the render pipeline.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across modules.
pub mod constants;

/// Extraction of `required` and `default` directives from template source.
pub mod directive;

/// Execution of command-backed defaults.
pub mod executor;

/// Extension traits for standard library types.
pub mod ext;

/// A set of helpers for reading templates and writing output.
pub mod ioutils;

/// Template rendering functionality.
pub mod renderer;

/// Required variable checks.
pub mod validation;

/// Variable sources and precedence.
pub mod variables;
