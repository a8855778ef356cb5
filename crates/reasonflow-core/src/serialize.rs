//! Persisted chain format.
//!
//! A chain is stored as a JSON object:
//!
//! ```json
//! {
//!   "chain_id": "syllogism",
//!   "title": "Socrates is mortal",
//!   "description": "optional",
//!   "steps": [
//!     { "step_id": "p1", "content": "All men are mortal.", "step_type": "premise",
//!       "depends_on": [], "confidence": 1.0, "notes": "optional" }
//!   ]
//! }
//! ```
//!
//! Loading applies every construction invariant (blank fields, confidence
//! range, duplicate IDs). Saving writes every field, so a save/load round trip
//! reproduces the chain exactly.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::builder::ChainBuilder;
use crate::chain::ReasoningChain;
use crate::error::{ChainError, Result};
use crate::step::{ReasoningStep, StepKind};

/// Chain ID used by [`build_lenient`] when the document has none.
pub const DEFAULT_CHAIN_ID: &str = "chain_1";

/// Title used by [`build_lenient`] when the document has none.
pub const DEFAULT_TITLE: &str = "Untitled Chain";

/// Wire form of a [`ReasoningChain`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRecord {
    pub chain_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
}

/// Wire form of a [`ReasoningStep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step_id: String,
    pub content: String,
    #[serde(default)]
    pub step_type: StepKind,
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Absent means "use the kind's default".
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TryFrom<StepRecord> for ReasoningStep {
    type Error = ChainError;

    fn try_from(record: StepRecord) -> Result<Self> {
        let mut step = ReasoningStep::new(record.step_id, record.content, record.step_type)?
            .with_depends_on(record.depends_on);
        if let Some(confidence) = record.confidence {
            step = step.with_confidence(confidence)?;
        }
        if let Some(notes) = record.notes {
            step = step.with_notes(notes);
        }
        Ok(step)
    }
}

impl From<&ReasoningStep> for StepRecord {
    fn from(step: &ReasoningStep) -> Self {
        Self {
            step_id: step.id().to_string(),
            content: step.content().to_string(),
            step_type: step.kind(),
            depends_on: step.depends_on().to_vec(),
            confidence: Some(step.confidence()),
            notes: step.notes().map(str::to_string),
        }
    }
}

impl TryFrom<ChainRecord> for ReasoningChain {
    type Error = ChainError;

    fn try_from(record: ChainRecord) -> Result<Self> {
        let mut chain = ReasoningChain::new(record.chain_id, record.title)?;
        if let Some(description) = record.description {
            chain = chain.with_description(description);
        }
        for step in record.steps {
            chain.add_step(step.try_into()?)?;
        }
        Ok(chain)
    }
}

impl From<ReasoningChain> for ChainRecord {
    fn from(chain: ReasoningChain) -> Self {
        Self {
            chain_id: chain.id().to_string(),
            title: chain.title().to_string(),
            description: chain.description().map(str::to_string),
            steps: chain.steps().map(StepRecord::from).collect(),
        }
    }
}

impl ReasoningChain {
    /// Parse a chain from its JSON form, enforcing all invariants.
    pub fn from_json(json: &str) -> Result<Self> {
        let chain: ReasoningChain = serde_json::from_str(json)?;
        debug!(chain = chain.id(), steps = chain.len(), "loaded chain");
        Ok(chain)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A step entry that [`build_lenient`] could not use.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedStep {
    /// Position of the entry in the `steps` array.
    pub index: usize,
    pub reason: String,
}

/// Result of a lenient build.
#[derive(Debug, Clone)]
pub struct LenientBuild {
    pub chain: ReasoningChain,
    pub skipped: Vec<SkippedStep>,
    /// Chain-level fields that had the wrong JSON type and were ignored.
    pub warnings: Vec<String>,
}

/// Build a chain from a loosely-specified document.
///
/// A missing, null or blank `chain_id` or `title` falls back to
/// [`DEFAULT_CHAIN_ID`] or [`DEFAULT_TITLE`]. A chain-level field of the wrong
/// JSON type is ignored and recorded in [`LenientBuild::warnings`]. Each step
/// entry that is malformed, violates a step invariant, or repeats an ID is
/// skipped and recorded rather than aborting the whole build.
pub fn build_lenient(doc: &Value) -> Result<LenientBuild> {
    let mut warnings = Vec::new();
    let chain_id = text_field(doc, "chain_id", &mut warnings).unwrap_or(DEFAULT_CHAIN_ID);
    let title = text_field(doc, "title", &mut warnings).unwrap_or(DEFAULT_TITLE);

    let mut builder = ChainBuilder::new(chain_id, title)?;
    if let Some(description) = text_field(doc, "description", &mut warnings) {
        builder.description(description);
    }

    let entries = match doc.get("steps") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(other) => {
            warnings.push(format!(
                "steps must be an array, found {}; building an empty chain",
                json_type(other)
            ));
            &[][..]
        }
    };

    let mut skipped = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let step = serde_json::from_value::<StepRecord>(entry.clone())
            .map_err(ChainError::from)
            .and_then(ReasoningStep::try_from);
        let outcome = step.and_then(|step| builder.push(step).map(|_| ()));
        if let Err(e) = outcome {
            skipped.push(SkippedStep {
                index,
                reason: e.to_string(),
            });
        }
    }

    Ok(LenientBuild {
        chain: builder.build(),
        skipped,
        warnings,
    })
}

/// A non-blank string field of `doc`. Anything other than a string, null or
/// absence is noted in `warnings`.
fn text_field<'a>(doc: &'a Value, field: &str, warnings: &mut Vec<String>) -> Option<&'a str> {
    match doc.get(field)? {
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text),
        Value::Null => None,
        other => {
            warnings.push(format!(
                "{field} must be a string, found {}; ignoring it",
                json_type(other)
            ));
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
