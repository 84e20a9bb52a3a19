//! Diagnostic report filled by the static validators.

use std::fmt;

/// How bad a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The game cannot be played.
    Error,
    /// Suspicious but playable.
    Warning,
}

/// One authoring problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the node that raised it.
    pub ludeme: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}: {}", self.ludeme, self.message)
    }
}

/// Append-only collection of diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, ludeme: &str, message: impl Into<String>) {
        self.push(Severity::Error, ludeme, message.into());
    }

    pub fn add_warning(&mut self, ludeme: &str, message: impl Into<String>) {
        self.push(Severity::Warning, ludeme, message.into());
    }

    fn push(&mut self, severity: Severity, ludeme: &str, message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            ludeme: ludeme.to_string(),
            message,
        });
    }

    /// Number of error-level diagnostics.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Check whether the report holds any error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error_count() > 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = Report::new();
        assert!(report.is_empty());
        assert!(!report.is_error());

        report.add_warning("SitesRow", "row 9 does not exist");
        assert!(!report.is_error());

        report.add_error("IsAnyDie", "game has no dice");
        assert!(report.is_error());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_report_display() {
        let mut report = Report::new();
        report.add_error("IsAnyDie", "game has no dice");
        report.add_warning("Hint", "game has no hints");

        assert_eq!(
            report.to_string(),
            "error: IsAnyDie: game has no dice\nwarning: Hint: game has no hints"
        );
    }
}
