//! Structural fallacy detection.

use reasonflow_core::{ReasoningChain, StepKind};
use tracing::{debug, trace};

use crate::cycles::cycle_members;
use crate::issue::{issue_id, FallacyKind, ValidationIssue};
use crate::report::ChainValidation;

/// Runs the structural checks over a chain.
///
/// The checks run in a fixed order (broken dependencies, cycles, unsupported
/// conclusions, missing premises) and every issue found is kept. The chain is
/// only read.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallacyDetector;

impl FallacyDetector {
    pub fn new() -> Self {
        Self
    }

    /// Validate `chain` and report every issue found.
    pub fn validate(&self, chain: &ReasoningChain) -> ChainValidation {
        let mut log = IssueLog::default();

        self.broken_dependencies(chain, &mut log);
        trace!(issues = log.len(), "broken dependency check done");

        for step_id in cycle_members(chain) {
            log.push(
                step_id,
                FallacyKind::CircularReasoning,
                format!("Step '{step_id}' is part of a circular dependency."),
            );
        }
        trace!(issues = log.len(), "cycle check done");

        for step in chain.conclusions() {
            if step.is_root() {
                log.push(
                    step.id(),
                    FallacyKind::UnsupportedConclusion,
                    format!("Conclusion '{}' has no supporting steps.", step.id()),
                );
            }
        }
        trace!(issues = log.len(), "unsupported conclusion check done");

        // Evidence and assumptions may legitimately stand alone.
        for step in chain.steps_of_kind(StepKind::Inference) {
            if step.is_root() {
                log.push(
                    step.id(),
                    FallacyKind::MissingPremise,
                    format!(
                        "Inference '{}' has no premise or evidence dependencies.",
                        step.id()
                    ),
                );
            }
        }
        trace!(issues = log.len(), "missing premise check done");

        let validation = ChainValidation::new(chain.id(), chain.title(), chain.len(), log.issues);
        debug!(
            chain = chain.id(),
            valid = validation.is_valid,
            errors = validation.error_count(),
            warnings = validation.warning_count(),
            "validated chain"
        );
        validation
    }

    fn broken_dependencies(&self, chain: &ReasoningChain, log: &mut IssueLog) {
        for step in chain.steps() {
            for dep in step.depends_on().iter().filter(|d| !chain.contains(d)) {
                log.push(
                    step.id(),
                    FallacyKind::BrokenDependency,
                    format!("Step '{}' depends on unknown step '{dep}'.", step.id()),
                );
            }
        }
    }
}

/// Convenience wrapper for [`FallacyDetector::validate`].
pub fn validate(chain: &ReasoningChain) -> ChainValidation {
    FallacyDetector::new().validate(chain)
}

/// Accumulates issues, numbering them in detection order.
#[derive(Default)]
struct IssueLog {
    issues: Vec<ValidationIssue>,
}

impl IssueLog {
    fn push(&mut self, step_id: &str, fallacy: FallacyKind, message: String) {
        let issue_id = issue_id(self.issues.len() + 1);
        self.issues.push(ValidationIssue {
            issue_id,
            step_id: step_id.to_string(),
            fallacy,
            message,
            severity: fallacy.severity(),
        });
    }

    fn len(&self) -> usize {
        self.issues.len()
    }
}
