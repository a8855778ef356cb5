//! Reasoning chain container, the central data structure.
//!
//! Steps are kept in insertion order behind an ID index, so iteration order is
//! stable and lookups stay O(1). Edges are implicit: every entry of a step's
//! `depends_on` is an edge from that dependency to the step.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChainError, Result};
use crate::serialize::ChainRecord;
use crate::step::{ReasoningStep, StepKind};

/// A directed graph of reasoning steps for one argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChainRecord", into = "ChainRecord")]
pub struct ReasoningChain {
    id: String,
    title: String,
    description: Option<String>,
    steps: Vec<ReasoningStep>,
    index: HashMap<String, usize>,
}

impl ReasoningChain {
    /// Create an empty chain. Both `id` and `title` must be non-blank.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ChainError::EmptyField { field: "chain_id" });
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ChainError::EmptyField { field: "title" });
        }
        Ok(Self {
            id,
            title,
            description: None,
            steps: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Attach a longer description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = Some(description);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    // --- Mutation ---

    /// Append a step, rejecting a duplicate ID.
    ///
    /// Dependencies are not resolved here; dangling references are legal and
    /// reported at validation time.
    pub fn add_step(&mut self, step: ReasoningStep) -> Result<()> {
        if self.index.contains_key(step.id()) {
            return Err(ChainError::DuplicateStep(step.id().to_string()));
        }
        debug!(chain = %self.id, step = step.id(), kind = step.kind().as_str(), "added step");
        self.index.insert(step.id().to_string(), self.steps.len());
        self.steps.push(step);
        Ok(())
    }

    // --- Queries ---

    /// Look up a step by ID.
    pub fn get(&self, id: &str) -> Option<&ReasoningStep> {
        self.index.get(id).map(|&pos| &self.steps[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of a step in insertion order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Iterate over all steps in insertion order.
    pub fn steps(&self) -> impl Iterator<Item = &ReasoningStep> {
        self.steps.iter()
    }

    /// Iterate over step IDs in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(ReasoningStep::id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps of one kind, in insertion order.
    pub fn steps_of_kind(&self, kind: StepKind) -> Vec<&ReasoningStep> {
        self.steps.iter().filter(|s| s.kind() == kind).collect()
    }

    pub fn conclusions(&self) -> Vec<&ReasoningStep> {
        self.steps_of_kind(StepKind::Conclusion)
    }

    pub fn premises(&self) -> Vec<&ReasoningStep> {
        self.steps_of_kind(StepKind::Premise)
    }

    /// Steps that list `id` among their dependencies.
    pub fn dependents(&self, id: &str) -> Vec<&ReasoningStep> {
        self.steps
            .iter()
            .filter(|s| s.depends_on().iter().any(|d| d == id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str, kind: StepKind) -> ReasoningStep {
        ReasoningStep::new(id, format!("statement {id}"), kind).unwrap()
    }

    #[test]
    fn empty_chain() {
        let chain = ReasoningChain::new("c", "Empty").unwrap();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert!(chain.description().is_none());
    }

    #[test]
    fn blank_identity_rejected() {
        assert!(ReasoningChain::new(" ", "Title").is_err());
        assert!(ReasoningChain::new("c", "").is_err());
    }

    #[test]
    fn add_and_get_step() {
        let mut chain = ReasoningChain::new("c", "T").unwrap();
        chain.add_step(step("p1", StepKind::Premise)).unwrap();

        let got = chain.get("p1").unwrap();
        assert_eq!(got.kind(), StepKind::Premise);
        assert!(chain.contains("p1"));
        assert!(!chain.contains("p2"));
        assert_eq!(chain.position("p1"), Some(0));
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut chain = ReasoningChain::new("c", "T").unwrap();
        chain.add_step(step("p1", StepKind::Premise)).unwrap();
        let err = chain.add_step(step("p1", StepKind::Evidence)).unwrap_err();
        assert!(matches!(err, ChainError::DuplicateStep(ref id) if id == "p1"));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.get("p1").unwrap().kind(), StepKind::Premise);
    }

    #[test]
    fn insertion_order_preserved() {
        let mut chain = ReasoningChain::new("c", "T").unwrap();
        for id in ["z", "a", "m", "b"] {
            chain.add_step(step(id, StepKind::Premise)).unwrap();
        }
        let ids: Vec<_> = chain.ids().collect();
        assert_eq!(ids, ["z", "a", "m", "b"]);
    }

    #[test]
    fn dangling_dependency_allowed() {
        let mut chain = ReasoningChain::new("c", "T").unwrap();
        let c1 = step("c1", StepKind::Conclusion).with_depends_on(["ghost"]);
        chain.add_step(c1).unwrap();
        assert!(!chain.contains("ghost"));
    }

    #[test]
    fn kind_queries() {
        let mut chain = ReasoningChain::new("c", "T").unwrap();
        chain.add_step(step("p1", StepKind::Premise)).unwrap();
        chain.add_step(step("p2", StepKind::Premise)).unwrap();
        chain
            .add_step(step("c1", StepKind::Conclusion).with_depends_on(["p1", "p2"]))
            .unwrap();

        assert_eq!(chain.premises().len(), 2);
        assert_eq!(chain.conclusions().len(), 1);
        assert!(chain.steps_of_kind(StepKind::Rebuttal).is_empty());

        let dependents: Vec<_> = chain.dependents("p1").iter().map(|s| s.id()).collect();
        assert_eq!(dependents, ["c1"]);
    }
}
