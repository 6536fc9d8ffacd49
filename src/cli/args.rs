use crate::constants::{exit_codes, verbosity, DEFAULT_ENV_PREFIX, DEFAULT_VARS_ENV};
use crate::variables::ResolverConfig;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

const AFTER_HELP: &str = r#"Directives:
  {% required NAME1 NAME2 %}   fail unless the variables are set and not blank
  {% default NAME=VALUE %}     fallback value, quotes are stripped
  {% default NAME=`command` %} fallback value taken from the command's output

Variable precedence, lowest first: environment, --data files, the JSON object
in --vars-env, --env-prefix variables, then defaults for missing or blank values.
"#;

/// Render a Jinja template with variables from the environment and JSON files.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Args {
    /// Template file. Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Output file, or `-` for stdout. Defaults to the template path without
    /// its extension, or stdout when reading from stdin.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// JSON (or YAML, by extension) variable file. Repeatable; later files win.
    #[arg(short, long = "data", value_name = "FILE")]
    pub data: Vec<PathBuf>,

    /// Validate required variables without rendering.
    #[arg(long = "check-only")]
    pub check_only: bool,

    /// Print defaults as `export NAME="VALUE"` lines and exit.
    #[arg(long = "emit-defaults")]
    pub emit_defaults: bool,

    /// Fail on undefined variables instead of rendering them empty.
    #[arg(long)]
    pub strict: bool,

    /// Kill command defaults that run longer than this many seconds.
    #[arg(long = "default-timeout", value_name = "SECONDS")]
    pub default_timeout: Option<u64>,

    /// Environment variable holding a JSON object of variables.
    #[arg(long = "vars-env", value_name = "NAME", default_value = DEFAULT_VARS_ENV)]
    pub vars_env: String,

    /// Prefix of environment variables passed to the template with the prefix removed.
    #[arg(long = "env-prefix", value_name = "PREFIX", default_value = DEFAULT_ENV_PREFIX)]
    pub env_prefix: String,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            template: None,
            output: None,
            data: Vec::new(),
            check_only: false,
            emit_defaults: false,
            strict: false,
            default_timeout: None,
            vars_env: DEFAULT_VARS_ENV.to_string(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            verbose: verbosity::OFF,
        }
    }
}

impl Args {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig { vars_env: self.vars_env.clone(), env_prefix: self.env_prefix.clone() }
    }

    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout.map(Duration::from_secs)
    }
}

/// Parse command line arguments. Usage errors exit with the failure code,
/// `--help` and `--version` exit successfully.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            if let Err(print_err) = e.print() {
                eprintln!("Failed to display usage error: {print_err}");
            }
            std::process::exit(exit_codes::FAILURE);
        }
        e.exit()
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
