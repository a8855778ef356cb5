//! Individual validation issues.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a validation issue.
///
/// Only errors make a chain invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.pad("ERROR"),
            Severity::Warning => f.pad("WARN"),
        }
    }
}

/// The structural defect an issue reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallacyKind {
    /// A step depends on an ID that is not in the chain.
    BrokenDependency,
    /// A step is a member of a dependency cycle.
    CircularReasoning,
    /// A conclusion rests on nothing.
    UnsupportedConclusion,
    /// An inference rests on nothing.
    MissingPremise,
}

impl FallacyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallacyKind::BrokenDependency => "broken_dependency",
            FallacyKind::CircularReasoning => "circular_reasoning",
            FallacyKind::UnsupportedConclusion => "unsupported_conclusion",
            FallacyKind::MissingPremise => "missing_premise",
        }
    }

    /// Severity attached to every issue of this kind.
    pub fn severity(&self) -> Severity {
        match self {
            FallacyKind::MissingPremise => Severity::Warning,
            FallacyKind::BrokenDependency
            | FallacyKind::CircularReasoning
            | FallacyKind::UnsupportedConclusion => Severity::Error,
        }
    }
}

impl fmt::Display for FallacyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural defect found in a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Sequential ID in detection order, `issue_0001` onwards.
    pub issue_id: String,
    pub step_id: String,
    pub fallacy: FallacyKind,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:<5}] {}: {}", self.severity, self.step_id, self.message)
    }
}

/// Format the `n`th issue ID (1-based).
pub(crate) fn issue_id(n: usize) -> String {
    format!("issue_{n:04}")
}
