//! Reasoning steps and the closed set of step kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, Result};

/// Identifier of a step, unique within its chain.
pub type StepId = String;

/// The role a step plays in an argument.
///
/// Persisted as its lowercase name; parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StepKind {
    /// A statement accepted as a starting point.
    Premise,
    /// A statement derived from other steps.
    #[default]
    Inference,
    /// A statement taken as true without verification.
    Assumption,
    /// The claim the argument sets out to establish.
    Conclusion,
    /// An observation or datum supporting other steps.
    Evidence,
    /// A counter-argument against another step.
    Rebuttal,
}

impl StepKind {
    /// Every kind, in declaration order.
    pub const ALL: [StepKind; 6] = [
        StepKind::Premise,
        StepKind::Inference,
        StepKind::Assumption,
        StepKind::Conclusion,
        StepKind::Evidence,
        StepKind::Rebuttal,
    ];

    /// Confidence assigned when the author does not give one.
    ///
    /// Assumptions start lower to reflect their unverified status.
    pub fn default_confidence(&self) -> f64 {
        match self {
            StepKind::Assumption => 0.8,
            StepKind::Premise
            | StepKind::Inference
            | StepKind::Conclusion
            | StepKind::Evidence
            | StepKind::Rebuttal => 1.0,
        }
    }

    /// Lowercase name as used in the persisted format.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Premise => "premise",
            StepKind::Inference => "inference",
            StepKind::Assumption => "assumption",
            StepKind::Conclusion => "conclusion",
            StepKind::Evidence => "evidence",
            StepKind::Rebuttal => "rebuttal",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Premise => write!(f, "PREMISE"),
            StepKind::Inference => write!(f, "INFERENCE"),
            StepKind::Assumption => write!(f, "ASSUMPTION"),
            StepKind::Conclusion => write!(f, "CONCLUSION"),
            StepKind::Evidence => write!(f, "EVIDENCE"),
            StepKind::Rebuttal => write!(f, "REBUTTAL"),
        }
    }
}

impl FromStr for StepKind {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        StepKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChainError::UnknownKind(s.to_string()))
    }
}

impl TryFrom<String> for StepKind {
    type Error = ChainError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<StepKind> for String {
    fn from(kind: StepKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A single statement in a reasoning chain.
///
/// Identifier and content are stored trimmed and are never blank; confidence
/// always lies in `[0.0, 1.0]`. Dependencies are not checked against any chain
/// here, so a step may name steps that have not been added yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningStep {
    id: StepId,
    content: String,
    kind: StepKind,
    depends_on: Vec<StepId>,
    confidence: f64,
    notes: Option<String>,
}

impl ReasoningStep {
    /// Create a step with no dependencies and the kind's default confidence.
    pub fn new(id: impl Into<String>, content: impl Into<String>, kind: StepKind) -> Result<Self> {
        let id = non_blank(id.into(), "step_id")?;
        let content = non_blank(content.into(), "content")?;
        Ok(Self {
            id,
            content,
            kind,
            depends_on: Vec::new(),
            confidence: kind.default_confidence(),
            notes: None,
        })
    }

    /// Set the steps this one requires, replacing any previous list.
    pub fn with_depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Set the confidence, rejecting values outside `[0.0, 1.0]`.
    pub fn with_confidence(mut self, confidence: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ChainError::ConfidenceOutOfRange {
                step_id: self.id,
                value: confidence,
            });
        }
        self.confidence = confidence;
        Ok(self)
    }

    /// Attach free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// IDs this step requires, in author order.
    pub fn depends_on(&self) -> &[StepId] {
        &self.depends_on
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// True if the step lists no dependencies at all.
    pub fn is_root(&self) -> bool {
        self.depends_on.is_empty()
    }
}

fn non_blank(value: String, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ChainError::EmptyField { field });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}
