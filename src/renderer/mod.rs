//! Template rendering for render
//!
//! - `interface`: the `TemplateRenderer` trait the runner talks to
//! - `minijinja`: the MiniJinja implementation
//! - `filters`: custom filters registered on the environment

pub mod filters;
pub mod interface;
pub mod minijinja;

pub use self::minijinja::MiniJinjaRenderer;
pub use interface::TemplateRenderer;
