//! Reasoning chain model for ReasonFlow.
//!
//! A [`ReasoningChain`] is a directed graph of typed [`ReasoningStep`]s. Each
//! step names the steps it depends on; those names may be dangling or cyclic,
//! and it is the detector's job (in `reasonflow-check`) to report that. This
//! crate provides the model, the [`ChainBuilder`], the persisted JSON format,
//! and the ordering/depth engine shared by every renderer.

pub mod builder;
pub mod chain;
pub mod error;
pub mod order;
pub mod serialize;
pub mod step;

pub use builder::ChainBuilder;
pub use chain::ReasoningChain;
pub use error::ChainError;
pub use order::{depth_of, depths, topological_order, ChainLayout};
pub use serialize::{build_lenient, ChainRecord, LenientBuild, SkippedStep, StepRecord};
pub use step::{ReasoningStep, StepId, StepKind};
