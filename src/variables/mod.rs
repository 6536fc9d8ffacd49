//! Variable sources and the merge that turns them into a render context.

pub mod env;
pub mod file;
pub mod resolver;

use indexmap::IndexMap;
use serde_json::Value;

pub use env::EnvSnapshot;
pub use file::VariableFile;
pub use resolver::{ResolverConfig, VariableResolver};

/// Final flat mapping handed to the renderer.
pub type VariableContext = IndexMap<String, Value>;

/// Whether `value` is an empty or whitespace-only string.
///
/// Values of other types always stringify to something visible.
pub fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}
