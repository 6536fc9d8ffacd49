#![allow(dead_code)]

use render::cli::{Args, Outcome, Runner};
use render::error::Result;
use render::variables::EnvSnapshot;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding a template and its variable files.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes `content` to `name` and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).unwrap()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    /// Args for rendering `template`, with the output path derived from it.
    pub fn args(&self, template: &str) -> Args {
        Args { template: Some(self.path(template)), ..Args::default() }
    }
}

/// Result of a run together with everything it printed.
pub struct Run {
    pub result: Result<Outcome>,
    pub stdout: String,
}

/// Runs `args` against `env` only, never the process environment.
pub fn run_with_env(args: Args, env: &[(&str, &str)]) -> Run {
    let env: EnvSnapshot = env.iter().copied().collect();
    let mut stdout = Vec::new();
    let result = Runner::new(args).with_environment(env).run_with_stdout(&mut stdout);
    Run { result, stdout: String::from_utf8(stdout).unwrap() }
}

pub fn run_isolated(args: Args) -> Run {
    run_with_env(args, &[])
}

pub fn rendered_to(path: &Path) -> Outcome {
    Outcome::Rendered { destination: render::cli::Destination::File(path.to_path_buf()) }
}
