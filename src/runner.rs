//! External command execution and capability probing.

use std::{
    io,
    path::Path,
    process::{Command, Stdio},
};

use tracing::debug;

/// Captured result of an external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// The most useful diagnostic text the command produced.
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Runs external programs on behalf of the retrieval strategies.
pub trait CommandRunner {
    /// Run `program` with `args`, optionally inside `cwd`, capturing its output.
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> io::Result<CommandOutput>;
}

/// Runner backed by real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> io::Result<CommandOutput> {
        debug!(program, ?args, ?cwd, "running command");
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        let output = command.output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Check whether `program` is installed by asking for its version.
///
/// Spawn failures and non-zero exits both report the program as unavailable.
pub fn is_available(runner: &impl CommandRunner, program: &str) -> bool {
    let available = runner
        .run(program, &["--version"], None)
        .map(|output| output.success)
        .unwrap_or(false);
    debug!(program, available, "probed for command");
    available
}
