//! Warning aggregation and diagnostic summaries.

/// Aggregates user-facing warnings for a command run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Collected warning messages.
    warnings: Vec<String>,
}

impl Diagnostics {
    /// Record a warning and print it immediately.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        eprintln!("Warning: {message}");
        self.warnings.push(message);
    }

    /// Print a non-warning continuation line.
    pub(crate) fn note(&self, message: impl Into<String>) {
        eprintln!("{}", message.into());
    }

    /// Warnings recorded so far.
    pub(crate) fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Print a warning summary when warnings were emitted.
    pub(crate) fn print_warning_summary(&self) {
        let warnings = self.warnings();
        if warnings.is_empty() {
            return;
        }

        eprintln!("Completed with {} warning(s).", warnings.len());
    }
}
