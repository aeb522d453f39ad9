//! Developer workflow tasks for the skillget workspace.

use std::{
    env,
    process::{Command, ExitCode, Stdio},
};

fn main() -> ExitCode {
    let Some(task) = parse_task() else {
        eprintln!("Usage: cargo xtask <tidy|check>");
        return ExitCode::from(2);
    };
    let steps: &[&[&str]] = match task {
        Task::Tidy => &[
            &["+nightly", "fmt", "--all"],
            &[
                "clippy",
                "-q",
                "--fix",
                "--all",
                "--all-targets",
                "--all-features",
                "--allow-dirty",
            ],
        ],
        Task::Check => &[
            &["fmt", "--all", "--check"],
            &["clippy", "-q", "--all", "--all-targets", "--", "-D", "warnings"],
            &["test", "-q", "--workspace"],
        ],
    };

    for args in steps {
        if !run_cargo(args) {
            return ExitCode::from(1);
        }
    }
    ExitCode::SUCCESS
}

/// Workspace maintenance tasks.
enum Task {
    /// Format and apply clippy fixes in place.
    Tidy,
    /// Verify formatting, lints and tests without modifying files.
    Check,
}

fn parse_task() -> Option<Task> {
    let mut args = env::args().skip(1);
    let task = match args.next().as_deref() {
        Some("tidy") => Task::Tidy,
        Some("check") => Task::Check,
        _ => return None,
    };
    args.next().is_none().then_some(task)
}

fn run_cargo(args: &[&str]) -> bool {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    match Command::new(&cargo)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
    {
        Ok(status) if status.success() => true,
        Ok(status) => {
            eprintln!("`cargo {}` failed with status {status}", args.join(" "));
            false
        }
        Err(err) => {
            eprintln!("Failed to run `{cargo}`: {err}");
            false
        }
    }
}
