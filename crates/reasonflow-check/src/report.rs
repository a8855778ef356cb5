//! The result of validating one chain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::issue::{Severity, ValidationIssue};

/// Validation report for a chain.
///
/// `is_valid` is true exactly when no issue has error severity. Warnings are
/// reported but never invalidate a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainValidation {
    pub chain_id: String,
    #[serde(default)]
    pub title: String,
    pub step_count: usize,
    pub issues: Vec<ValidationIssue>,
    pub is_valid: bool,
}

impl ChainValidation {
    pub(crate) fn new(
        chain_id: &str,
        title: &str,
        step_count: usize,
        issues: Vec<ValidationIssue>,
    ) -> Self {
        let is_valid = !issues.iter().any(ValidationIssue::is_error);
        Self {
            chain_id: chain_id.to_string(),
            title: title.to_string(),
            step_count,
            issues,
            is_valid,
        }
    }

    /// Error-severity issues in detection order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.with_severity(Severity::Error)
    }

    /// Warning-severity issues in detection order.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Issues attached to one step.
    pub fn issues_for<'a>(&'a self, step_id: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.step_id == step_id)
    }

    /// Worst severity reported against `step_id`, if any.
    pub fn worst_severity(&self, step_id: &str) -> Option<Severity> {
        let mut worst = None;
        for issue in self.issues_for(step_id) {
            if issue.is_error() {
                return Some(Severity::Error);
            }
            worst = Some(Severity::Warning);
        }
        worst
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ChainValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_valid { "VALID" } else { "INVALID" };
        writeln!(f, "Chain '{}': {status}", self.title)?;
        write!(
            f,
            "Steps: {}  Errors: {}  Warnings: {}",
            self.step_count,
            self.error_count(),
            self.warning_count()
        )?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{issue_id, FallacyKind};

    fn issue(n: usize, step: &str, fallacy: FallacyKind) -> ValidationIssue {
        ValidationIssue {
            issue_id: issue_id(n),
            step_id: step.into(),
            fallacy,
            message: format!("{fallacy} on {step}"),
            severity: fallacy.severity(),
        }
    }

    #[test]
    fn warnings_alone_stay_valid() {
        let report = ChainValidation::new("c", "C", 2, vec![issue(1, "i1", FallacyKind::MissingPremise)]);
        assert!(report.is_valid);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.worst_severity("i1"), Some(Severity::Warning));
        assert_eq!(report.worst_severity("p1"), None);
    }

    #[test]
    fn any_error_invalidates() {
        let report = ChainValidation::new(
            "c",
            "C",
            3,
            vec![
                issue(1, "i1", FallacyKind::MissingPremise),
                issue(2, "i1", FallacyKind::CircularReasoning),
                issue(3, "c1", FallacyKind::UnsupportedConclusion),
            ],
        );
        assert!(!report.is_valid);
        assert_eq!(report.issues_for("i1").count(), 2);
        assert_eq!(report.worst_severity("i1"), Some(Severity::Error));
        let errors: Vec<_> = report.errors().map(|i| i.step_id.as_str()).collect();
        assert_eq!(errors, ["i1", "c1"]);
    }

    #[test]
    fn display_summary() {
        let report = ChainValidation::new(
            "c",
            "Cheap talk",
            1,
            vec![issue(1, "c1", FallacyKind::UnsupportedConclusion)],
        );
        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Chain 'Cheap talk': INVALID");
        assert_eq!(lines[1], "Steps: 1  Errors: 1  Warnings: 0");
        assert!(lines[2].starts_with("  [ERROR] c1: "));
    }

    #[test]
    fn json_carries_validity() {
        let report = ChainValidation::new("c", "C", 0, Vec::new());
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["chain_id"], "c");
        assert_eq!(value["title"], "C");
        assert_eq!(value["is_valid"], true);
        assert_eq!(value["step_count"], 0);
        assert!(value["issues"].as_array().unwrap().is_empty());
    }
}
