//! Incremental chain construction.
//!
//! The `ChainBuilder` assembles a [`ReasoningChain`] one step at a time. Each
//! mutator returns the builder again so calls can be chained with `?`.
//! Duplicate IDs and invalid step fields fail immediately; dependencies are
//! never checked here, so a step may name a step added later.
//!
//! # Example
//!
//! ```rust
//! use reasonflow_core::builder::ChainBuilder;
//!
//! let mut builder = ChainBuilder::new("tax", "Tax Argument").unwrap();
//! builder
//!     .premise("p1", "All citizens pay taxes.").unwrap()
//!     .premise("p2", "Alice is a citizen.").unwrap()
//!     .inference("i1", "Alice pays taxes.", ["p1", "p2"]).unwrap()
//!     .conclusion("c1", "Alice is a taxpayer.", ["i1"]).unwrap();
//!
//! let chain = builder.build();
//! assert_eq!(chain.len(), 4);
//! ```

use crate::chain::ReasoningChain;
use crate::error::Result;
use crate::step::{ReasoningStep, StepKind};

/// A builder for reasoning chains.
#[derive(Debug)]
pub struct ChainBuilder {
    chain: ReasoningChain,
}

impl ChainBuilder {
    /// Start an empty chain.
    pub fn new(chain_id: impl Into<String>, title: impl Into<String>) -> Result<Self> {
        Ok(Self {
            chain: ReasoningChain::new(chain_id, title)?,
        })
    }

    /// Set the chain's description.
    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.chain.set_description(description.into());
        self
    }

    /// Add a step of any kind.
    ///
    /// `confidence` of `None` selects the kind's default.
    pub fn add_step<I, S>(
        &mut self,
        id: &str,
        content: &str,
        kind: StepKind,
        depends_on: I,
        confidence: Option<f64>,
        notes: Option<String>,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut step = ReasoningStep::new(id, content, kind)?.with_depends_on(depends_on);
        if let Some(confidence) = confidence {
            step = step.with_confidence(confidence)?;
        }
        if let Some(notes) = notes {
            step = step.with_notes(notes);
        }
        self.chain.add_step(step)?;
        Ok(self)
    }

    /// Append an already-constructed step.
    pub fn push(&mut self, step: ReasoningStep) -> Result<&mut Self> {
        self.chain.add_step(step)?;
        Ok(self)
    }

    // === Convenience step constructors ===

    /// Add a premise. Premises take no dependencies.
    pub fn premise(&mut self, id: &str, content: &str) -> Result<&mut Self> {
        self.add_step(id, content, StepKind::Premise, no_deps(), None, None)
    }

    /// Add an inference drawn from `depends_on`.
    pub fn inference<I, S>(&mut self, id: &str, content: &str, depends_on: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_step(id, content, StepKind::Inference, depends_on, None, None)
    }

    /// Add an assumption at the lower default confidence.
    pub fn assumption(&mut self, id: &str, content: &str) -> Result<&mut Self> {
        self.add_step(id, content, StepKind::Assumption, no_deps(), None, None)
    }

    /// Add a conclusion supported by `depends_on`.
    pub fn conclusion<I, S>(&mut self, id: &str, content: &str, depends_on: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_step(id, content, StepKind::Conclusion, depends_on, None, None)
    }

    /// Add a piece of evidence, optionally resting on other steps.
    pub fn evidence<I, S>(&mut self, id: &str, content: &str, depends_on: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_step(id, content, StepKind::Evidence, depends_on, None, None)
    }

    /// Add a rebuttal of the steps in `depends_on`.
    pub fn rebuttal<I, S>(&mut self, id: &str, content: &str, depends_on: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_step(id, content, StepKind::Rebuttal, depends_on, None, None)
    }

    /// Number of steps added so far.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Finish construction and hand over the chain.
    pub fn build(self) -> ReasoningChain {
        self.chain
    }
}

fn no_deps() -> std::iter::Empty<String> {
    std::iter::empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChainError;

    #[test]
    fn syllogism() {
        let mut b = ChainBuilder::new("syllogism", "Socrates is Mortal").unwrap();
        b.premise("p1", "All humans are mortal.")
            .unwrap()
            .premise("p2", "Socrates is human.")
            .unwrap()
            .conclusion("c1", "Socrates is mortal.", ["p1", "p2"])
            .unwrap();

        let chain = b.build();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.get("c1").unwrap().depends_on(), ["p1", "p2"]);
        let ids: Vec<_> = chain.ids().collect();
        assert_eq!(ids, ["p1", "p2", "c1"]);
    }

    #[test]
    fn duplicate_rejected_and_builder_still_usable() {
        let mut b = ChainBuilder::new("c", "T").unwrap();
        b.premise("p1", "x").unwrap();
        let err = b.premise("p1", "y").unwrap_err();
        assert!(matches!(err, ChainError::DuplicateStep(_)));

        b.premise("p2", "z").unwrap();
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn kind_defaults_applied() {
        let mut b = ChainBuilder::new("c", "T").unwrap();
        b.assumption("a1", "The data is representative.")
            .unwrap()
            .evidence("e1", "Survey of 1000 people.", ["a1"])
            .unwrap()
            .rebuttal("r1", "The survey was biased.", ["e1"])
            .unwrap();
        let chain = b.build();

        assert_eq!(chain.get("a1").unwrap().confidence(), 0.8);
        assert_eq!(chain.get("e1").unwrap().confidence(), 1.0);
        assert_eq!(chain.get("r1").unwrap().kind(), StepKind::Rebuttal);
    }

    #[test]
    fn forward_references_allowed() {
        let mut b = ChainBuilder::new("c", "T").unwrap();
        b.conclusion("c1", "done", ["i1"])
            .unwrap()
            .inference("i1", "derived", ["p1"])
            .unwrap()
            .premise("p1", "given")
            .unwrap();
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn explicit_confidence_and_notes() {
        let mut b = ChainBuilder::new("c", "T").unwrap();
        b.add_step(
            "i1",
            "probably",
            StepKind::Inference,
            ["p1"],
            Some(0.6),
            Some("weak link".into()),
        )
        .unwrap();
        let err = b
            .add_step("i2", "surely", StepKind::Inference, ["p1"], Some(1.2), None)
            .unwrap_err();
        assert!(matches!(err, ChainError::ConfidenceOutOfRange { .. }));

        let chain = b.build();
        let i1 = chain.get("i1").unwrap();
        assert_eq!(i1.confidence(), 0.6);
        assert_eq!(i1.notes(), Some("weak link"));
        assert!(!chain.contains("i2"));
    }

    #[test]
    fn description_is_kept() {
        let mut b = ChainBuilder::new("c", "T").unwrap();
        b.description("longer text");
        b.premise("p1", "x").unwrap();
        let chain = b.build();
        assert_eq!(chain.description(), Some("longer text"));
        assert_eq!(chain.id(), "c");
        assert_eq!(chain.len(), 1);
    }
}
