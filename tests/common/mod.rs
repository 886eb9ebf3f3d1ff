//! Shared integration-test harness for running the `jsontype` binary with a
//! controlled environment and working directory.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// A `jsontype` invocation with its configuration variables cleared.
pub struct JsonTypeProcess {
    command: Command,
}

impl JsonTypeProcess {
    /// Starts an invocation that runs inside `dir`.
    pub fn new(dir: &Path) -> Self {
        let mut command = Command::new(env!("CARGO_BIN_EXE_jsontype"));
        command
            .current_dir(dir)
            .env_remove("CONFIG_JSON")
            .env_remove("CONFIG_PATH")
            .env_remove("JSONTYPE_LOG_LEVEL")
            .env("NO_COLOR", "1");
        Self { command }
    }

    /// Sets an environment variable for the child.
    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.command.env(key, value);
        self
    }

    /// Runs the binary with `args` and waits for it.
    #[allow(clippy::missing_panics_doc)]
    pub fn run(mut self, args: &[&str]) -> Output {
        self.command
            .args(args)
            .output()
            .expect("failed to spawn jsontype")
    }

    /// Runs `args` in a fresh empty directory.
    pub fn spawn_command(args: &[&str]) -> Output {
        let dir = tempfile::tempdir().expect("tempdir");
        Self::new(dir.path()).run(args)
    }
}

/// Stdout of a finished run, lossily decoded.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished run, lossily decoded.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
