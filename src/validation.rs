use crate::{
    directive::RequiredSet,
    error::{Error, Result},
    variables::{is_blank, VariableContext},
};

/// Returns the required names that are absent or blank in `context`, sorted.
pub fn missing_variables(required: &RequiredSet, context: &VariableContext) -> Vec<String> {
    required
        .iter()
        .filter(|name| context.get(name.as_str()).is_none_or(is_blank))
        .cloned()
        .collect()
}

/// Fails with every missing name at once.
pub fn ensure_required(required: &RequiredSet, context: &VariableContext) -> Result<()> {
    let missing = missing_variables(required, context);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingVariablesError(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn required(names: &[&str]) -> RequiredSet {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn context(entries: serde_json::Value) -> VariableContext {
        let serde_json::Value::Object(map) = entries else { panic!("fixture must be an object") };
        map.into_iter().collect()
    }

    #[test]
    fn reports_single_missing_name() {
        let missing = missing_variables(&required(&["X"]), &context(json!({"Y": "1"})));
        assert_eq!(missing, ["X"]);
    }

    #[test]
    fn reports_all_missing_names_sorted() {
        let missing = missing_variables(
            &required(&["zeta", "alpha", "mid", "ok"]),
            &context(json!({"ok": "yes", "mid": "\t "})),
        );
        assert_eq!(missing, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn whitespace_only_is_missing() {
        let missing = missing_variables(&required(&["A"]), &context(json!({"A": "   "})));
        assert_eq!(missing, ["A"]);
    }

    #[test]
    fn typed_values_satisfy_requirements() {
        let ctx = context(json!({"a": false, "b": 0, "c": [], "d": {}, "e": null}));
        assert!(missing_variables(&required(&["a", "b", "c", "d", "e"]), &ctx).is_empty());
    }

    #[test]
    fn ensure_required_batches_failures() {
        let err = ensure_required(&required(&["B", "A"]), &context(json!({}))).unwrap_err();
        assert_eq!(err.to_string(), "Missing required variables: A, B.");
        assert!(ensure_required(&required(&[]), &context(json!({}))).is_ok());
    }
}
