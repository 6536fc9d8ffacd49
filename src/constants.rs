//! Constants used throughout the render application

/// Environment variable holding a JSON object of overrides
pub const DEFAULT_VARS_ENV: &str = "JINJA2_VARS";

/// Prefix of environment variables contributing typed values
pub const DEFAULT_ENV_PREFIX: &str = "RENDER_";

/// STDIN/STDOUT indicator for CLI arguments
pub const STDIO_INDICATOR: &str = "-";

/// Template name used in engine error messages when reading from stdin
pub const STDIN_TEMPLATE_NAME: &str = "<stdin>";

/// Permission bits of written output files
pub const OUTPUT_FILE_MODE: u32 = 0o644;

/// Variable file extensions parsed as YAML; anything else is JSON
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Interpreter used for command-backed defaults
#[cfg(unix)]
pub const DEFAULT_SHELL: &[&str] = &["sh", "-c"];
#[cfg(windows)]
pub const DEFAULT_SHELL: &[&str] = &["cmd", "/C"];

/// Directive keywords recognized inside statement tags
pub mod directives {
    pub const REQUIRED: &str = "required";
    pub const DEFAULT: &str = "default";
    pub const BLOCK_START: &str = "{%";
    pub const BLOCK_END: &str = "%}";
    pub const COMMENT_START: &str = "{#";
    pub const COMMENT_END: &str = "#}";
    pub const RAW: &str = "raw";
    pub const END_RAW: &str = "endraw";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
