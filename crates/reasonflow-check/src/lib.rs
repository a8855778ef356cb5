//! Structural validation for reasoning chains.
//!
//! The [`FallacyDetector`] inspects a [`reasonflow_core::ReasoningChain`] and
//! reports structural defects as [`ValidationIssue`]s collected in a
//! [`ChainValidation`]. Defects are data, never errors: validation always
//! succeeds, whatever shape the chain is in.

pub mod cycles;
pub mod detector;
pub mod issue;
pub mod report;

pub use cycles::cycle_members;
pub use detector::{validate, FallacyDetector};
pub use issue::{FallacyKind, Severity, ValidationIssue};
pub use report::ChainValidation;
