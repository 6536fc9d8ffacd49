use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read template from stdin: {0}.")]
    StdinReadError(#[source] std::io::Error),

    #[error("Failed to read '{}': {source}.", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}.", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to stdout: {0}.")]
    StdoutWriteError(#[source] std::io::Error),

    #[error("Failed to parse variable file '{}': {reason}.", .path.display())]
    VariableFileParseError { path: PathBuf, reason: String },

    #[error("Failed to parse JSON from environment variable '{var}': {reason}.")]
    OverrideParseError { var: String, reason: String },

    /// A directive that could not be understood.
    #[error("Invalid directive '{directive}': {reason}.")]
    DirectiveError { directive: String, reason: String },

    /// When a command-backed default has failed.
    #[error("Failed to evaluate default for '{name}': {source}")]
    DefaultEvaluationError {
        name: String,
        #[source]
        source: CommandError,
    },

    #[error("Missing required variables: {}.", .0.join(", "))]
    MissingVariablesError(Vec<String>),

    /// Engine errors are shown as the engine reports them.
    #[error("{0}")]
    RenderError(#[from] minijinja::Error),
}

/// Failures of a single external command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Status { command: String, status: ExitStatus },

    #[error("`{command}` did not finish within {}s", .timeout.as_secs_f64())]
    Timeout { command: String, timeout: Duration },
}

/// Convenience type alias for Results with the crate error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_are_listed_together() {
        let err = Error::MissingVariablesError(vec!["A".into(), "B".into()]);
        assert_eq!(err.to_string(), "Missing required variables: A, B.");
    }

    #[test]
    fn read_error_names_the_path() {
        let err = Error::ReadError {
            path: PathBuf::from("vars.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("'vars.json'"));
    }

    #[test]
    fn default_evaluation_error_names_the_variable() {
        let err = Error::DefaultEvaluationError {
            name: "HOST".into(),
            source: CommandError::Timeout {
                command: "sleep 5".into(),
                timeout: Duration::from_secs(1),
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to evaluate default for 'HOST': `sleep 5` did not finish within 1s"
        );
    }
}
