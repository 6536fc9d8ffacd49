use super::{parser, scanner, DefaultValue, DefaultsMap, Directive, RequiredSet};
use crate::error::{Error, Result};
use crate::executor::CommandExecutor;

/// Output of directive extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Template text with every directive tag removed.
    pub template: String,
    /// Required names that have no default.
    pub required: RequiredSet,
    /// Defaults with command values already evaluated.
    pub defaults: DefaultsMap,
}

/// Removes directives from a template and evaluates them.
pub struct DirectiveExtractor<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> DirectiveExtractor<'a> {
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Extracts directives from `template`.
    ///
    /// Directives are processed in source order, so a later `default` for
    /// the same name replaces an earlier one. Command defaults run as soon as
    /// they are reached. Any name that ends up with a default is dropped from
    /// the required set.
    ///
    /// # Returns
    /// * `Result<Extraction>` - Cleaned template, required names and defaults
    pub fn extract(&self, template: &str) -> Result<Extraction> {
        let mut extraction = Extraction::default();
        let mut last = 0;

        for span in scanner::scan(template) {
            extraction.template.push_str(&template[last..span.range.start]);
            last = span.range.end;

            match parser::parse(span.source, span.body)? {
                Directive::Required { names } => {
                    log::debug!("Required variables declared: {names:?}");
                    extraction.required.extend(names);
                }
                Directive::Default { name, value } => {
                    let value = self.evaluate(&name, value)?;
                    if let Some(previous) = extraction.defaults.insert(name.clone(), value) {
                        log::debug!("Default for '{name}' replaces earlier value '{previous}'");
                    }
                }
            }
        }
        extraction.template.push_str(&template[last..]);

        let defaults = &extraction.defaults;
        extraction.required.retain(|name| !defaults.contains_key(name));

        Ok(extraction)
    }

    fn evaluate(&self, name: &str, value: DefaultValue) -> Result<String> {
        match value {
            DefaultValue::Literal(literal) => Ok(literal),
            DefaultValue::Command(command) => {
                log::debug!("Evaluating default for '{name}'");
                self.executor
                    .execute(&command)
                    .map_err(|source| Error::DefaultEvaluationError { name: name.to_string(), source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use test_log::test;

    /// Answers commands from a table and records every call.
    #[derive(Default)]
    struct FakeExecutor {
        outputs: HashMap<&'static str, &'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeExecutor {
        fn with(outputs: &[(&'static str, &'static str)]) -> Self {
            Self { outputs: outputs.iter().copied().collect(), ..Default::default() }
        }
    }

    impl CommandExecutor for FakeExecutor {
        fn execute(&self, command: &str) -> Result<String, CommandError> {
            self.calls.borrow_mut().push(command.to_string());
            match self.outputs.get(command) {
                Some(output) => Ok(output.trim().to_string()),
                None => Err(CommandError::Spawn {
                    command: command.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "unknown command"),
                }),
            }
        }
    }

    fn extract(template: &str) -> Result<Extraction> {
        DirectiveExtractor::new(&FakeExecutor::default()).extract(template)
    }

    fn names(set: &RequiredSet) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn removes_directives_without_touching_other_text() {
        let template = "line1\n{% required A %}\n  {%- default B='x' -%}  \n{{ A }}{% if B %}y{% endif %}\n";
        let extraction = extract(template).unwrap();
        assert_eq!(extraction.template, "line1\n\n    \n{{ A }}{% if B %}y{% endif %}\n");
    }

    #[test]
    fn template_without_directives_is_unchanged() {
        let template = "{# note #}{% for x in xs %}{{ x }}{% endfor %}";
        let extraction = extract(template).unwrap();
        assert_eq!(extraction.template, template);
        assert!(extraction.required.is_empty());
        assert!(extraction.defaults.is_empty());
    }

    #[test]
    fn unions_all_required_directives() {
        let extraction = extract("{% required B A %}x{% required C A %}").unwrap();
        assert_eq!(names(&extraction.required), ["A", "B", "C"]);
    }

    #[test]
    fn strips_quotes_from_defaults() {
        let extraction = extract("{% default A=\"one\" %}{% default B='two' %}{% default C=3 %}").unwrap();
        assert_eq!(extraction.defaults["A"], "one");
        assert_eq!(extraction.defaults["B"], "two");
        assert_eq!(extraction.defaults["C"], "3");
    }

    #[test]
    fn later_default_wins() {
        let extraction = extract("{% default X=first %}{% default X=second %}").unwrap();
        assert_eq!(extraction.defaults.len(), 1);
        assert_eq!(extraction.defaults["X"], "second");
    }

    #[test]
    fn defaulted_names_are_not_required() {
        let template = "{% required A B %}{% default A=1 %}{% required A %}";
        let extraction = extract(template).unwrap();
        assert_eq!(names(&extraction.required), ["B"]);
        assert_eq!(extraction.defaults["A"], "1");
    }

    #[test]
    fn evaluates_command_defaults_in_order() {
        let executor = FakeExecutor::with(&[("echo hi", "hi\n"), ("date", "today")]);
        let extraction = DirectiveExtractor::new(&executor)
            .extract("{% default A=`echo hi` %}{% default B=`date` %}{% default A=`echo hi` %}")
            .unwrap();
        assert_eq!(extraction.defaults["A"], "hi");
        assert_eq!(extraction.defaults["B"], "today");
        assert_eq!(*executor.calls.borrow(), ["echo hi", "date", "echo hi"]);
    }

    #[test]
    fn literal_defaults_do_not_run_commands() {
        let executor = FakeExecutor::default();
        DirectiveExtractor::new(&executor).extract("{% default A='`echo hi`' %}").unwrap();
        assert!(executor.calls.borrow().is_empty());
    }

    #[test]
    fn failed_command_names_the_variable() {
        let err = extract("{% default TOKEN=`false` %}").unwrap_err();
        match err {
            Error::DefaultEvaluationError { name, .. } => assert_eq!(name, "TOKEN"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_directive_is_reported_as_written() {
        let err = extract("ok {%- default NOPE -%} ok").unwrap_err();
        match err {
            Error::DirectiveError { directive, .. } => assert_eq!(directive, "{%- default NOPE -%}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn directives_inside_raw_blocks_are_kept() {
        let template = "{% raw %}{% required A %}{% endraw %}";
        let extraction = extract(template).unwrap();
        assert_eq!(extraction.template, template);
        assert!(extraction.required.is_empty());
    }
}
