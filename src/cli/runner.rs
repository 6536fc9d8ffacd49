use crate::{
    cli::Args,
    constants::{STDIN_TEMPLATE_NAME, STDIO_INDICATOR},
    directive::{DefaultsMap, DirectiveExtractor},
    error::Result,
    executor::{CommandExecutor, ShellExecutor},
    ext::PathExt,
    ioutils::{read_template, write_file, write_to},
    renderer::{MiniJinjaRenderer, TemplateRenderer},
    validation::ensure_required,
    variables::{EnvSnapshot, VariableFile, VariableResolver},
};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where rendered output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--emit-defaults`: defaults were printed, nothing was rendered.
    DefaultsEmitted,
    /// `--check-only`: all required variables are set, nothing was rendered.
    Checked,
    Rendered { destination: Destination },
}

/// Main CLI runner that orchestrates a single render
pub struct Runner<'a> {
    args: Args,
    environment: EnvSnapshot,
    executor: Box<dyn CommandExecutor + 'a>,
    engine: Box<dyn TemplateRenderer + 'a>,
}

impl<'a> Runner<'a> {
    /// Creates a runner for `args` with a snapshot of the current environment.
    pub fn new(args: Args) -> Self {
        let executor = ShellExecutor::new().with_timeout(args.default_timeout());
        let engine = MiniJinjaRenderer::new().strict(args.strict);
        Self {
            args,
            environment: EnvSnapshot::capture(),
            executor: Box::new(executor),
            engine: Box::new(engine),
        }
    }

    /// Replaces the environment the variables are resolved from.
    pub fn with_environment(mut self, environment: EnvSnapshot) -> Self {
        self.environment = environment;
        self
    }

    /// Replaces the executor used for command defaults.
    pub fn with_executor(mut self, executor: impl CommandExecutor + 'a) -> Self {
        self.executor = Box::new(executor);
        self
    }

    /// Replaces the engine that renders the template.
    pub fn with_engine(mut self, engine: impl TemplateRenderer + 'a) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Executes the run, printing to the process stdout.
    pub fn run(self) -> Result<Outcome> {
        let stdout = std::io::stdout();
        self.run_with_stdout(stdout.lock())
    }

    /// Executes the run: extract, resolve, validate, render, write.
    ///
    /// `stdout` receives `--emit-defaults` output and rendered output when
    /// the destination is stdout.
    pub fn run_with_stdout(self, stdout: impl Write) -> Result<Outcome> {
        let template_path = self.template_path();
        let source = read_template(template_path)?;

        let extraction = DirectiveExtractor::new(self.executor.as_ref()).extract(&source)?;
        log::debug!(
            "Found {} required variables and {} defaults",
            extraction.required.len(),
            extraction.defaults.len()
        );

        if self.args.emit_defaults {
            write_to(stdout, &format_exports(&extraction.defaults))?;
            return Ok(Outcome::DefaultsEmitted);
        }

        let files = self.args.data.iter().map(VariableFile::load).collect::<Result<Vec<_>>>()?;
        let config = self.args.resolver_config();
        let context = VariableResolver::new(&config, &self.environment)
            .resolve(&files, &extraction.defaults)?;

        ensure_required(&extraction.required, &context)?;

        if self.args.check_only {
            log::info!("All required variables are set");
            return Ok(Outcome::Checked);
        }

        let template_name = template_path
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .unwrap_or(STDIN_TEMPLATE_NAME);
        let rendered = self.engine.render(&extraction.template, &context, Some(template_name))?;

        let destination = self.destination();
        match &destination {
            Destination::Stdout => write_to(stdout, &rendered)?,
            Destination::File(path) => {
                write_file(&rendered, path)?;
                log::info!("Rendered {}", path.display());
            }
        }

        Ok(Outcome::Rendered { destination })
    }

    fn template_path(&self) -> Option<&Path> {
        self.args.template.as_deref().filter(|path| !is_stdio(path))
    }

    fn destination(&self) -> Destination {
        match (&self.args.output, self.template_path()) {
            (Some(output), _) if is_stdio(output) => Destination::Stdout,
            (Some(output), _) => Destination::File(output.clone()),
            (None, Some(template)) => match template.without_extension() {
                Some(output) => Destination::File(output),
                None => {
                    log::warn!(
                        "Template {} has no extension to strip, writing to stdout",
                        template.display()
                    );
                    Destination::Stdout
                }
            },
            (None, None) => Destination::Stdout,
        }
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_INDICATOR
}

/// Formats defaults as `export NAME="VALUE"` lines, sorted by name.
///
/// `\`, `"`, `$` and backticks in values are escaped so the output can be
/// evaluated by a POSIX shell.
pub fn format_exports(defaults: &DefaultsMap) -> String {
    let mut out = String::new();
    for (name, value) in defaults {
        out.push_str("export ");
        out.push_str(name);
        out.push_str("=\"");
        for c in value.chars() {
            if matches!(c, '\\' | '"' | '$' | '`') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push_str("\"\n");
    }
    out
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    Runner::new(args).run().map(|outcome| log::debug!("Run finished: {outcome:?}"))
}
