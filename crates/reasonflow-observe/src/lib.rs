//! Human-readable views of reasoning chains.
//!
//! Provides an indented text outline and a Mermaid flowchart. Both are pure
//! functions of the chain, the render options and, optionally, a detector
//! report used to flag offending steps.

pub mod diagram;
pub mod error;
pub mod format;
pub mod outline;
pub mod view;

pub use diagram::{node_shape, MermaidView};
pub use error::ObserveError;
pub use format::{escape_label, percent, sanitize_id, truncate};
pub use outline::OutlineView;
pub use view::{
    available_views, view_for, FlowDirection, RenderContext, RenderOptions, View, ViewFormat,
    ViewKind, ViewOutput,
};
