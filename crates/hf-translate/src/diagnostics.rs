//! Ordered translation diagnostics.
//!
//! Every entry is also emitted through `tracing` at the matching level, so a
//! subscriber sees the same stream the caller later inspects.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

/// One finding: what it is about (an equipment, system or zone name) and
/// what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        let subject = subject.into();
        let message = message.into();
        tracing::warn!(subject = %subject, "{message}");
        self.push(Severity::Warning, subject, message);
    }

    pub fn error(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        let subject = subject.into();
        let message = message.into();
        tracing::error!(subject = %subject, "{message}");
        self.push(Severity::Error, subject, message);
    }

    fn push(&mut self, severity: Severity, subject: String, message: String) {
        self.entries.push(Diagnostic {
            severity,
            subject,
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity == severity).count()
    }

    /// Entries of `severity` whose subject is exactly `subject`.
    pub fn about<'a>(
        &'a self,
        severity: Severity,
        subject: &'a str,
    ) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.entries
            .iter()
            .filter(move |d| d.severity == severity && d.subject == subject)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_order_and_severity() {
        let mut d = Diagnostics::new();
        d.warn("Coil", "missing curve");
        assert!(!d.has_errors());
        d.error("AHU", "two fans");
        assert!(d.has_errors());
        assert_eq!(d.entries()[0].subject, "Coil");
        assert_eq!(d.entries()[1].severity, Severity::Error);
        assert_eq!(d.count(Severity::Warning), 1);
        assert_eq!(d.about(Severity::Error, "AHU").count(), 1);
    }
}
