//! View trait and core abstractions for the rendering layer.

use std::fmt;
use std::str::FromStr;

use reasonflow_check::ChainValidation;
use reasonflow_core::ReasoningChain;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagram::MermaidView;
use crate::error::{ObserveError, Result};
use crate::outline::OutlineView;

/// The kind of view to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Outline,
    Diagram,
}

impl ViewKind {
    /// Parse a view kind from a string.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "text" | "outline" => Ok(ViewKind::Outline),
            "mermaid" | "diagram" => Ok(ViewKind::Diagram),
            _ => Err(ObserveError::UnknownView {
                name: s.to_string(),
            }),
        }
    }

    /// Display name for this view kind.
    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Outline => "text",
            ViewKind::Diagram => "mermaid",
        }
    }
}

/// The output format for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFormat {
    Text,
    Json,
}

/// The output of a view render.
///
/// `data` is the machine-readable projection printed by `visualize --json`.
#[derive(Debug)]
pub struct ViewOutput {
    /// Terminal-friendly text rendering.
    pub text: String,
    /// Machine-readable JSON (always populated).
    pub data: Value,
}

impl ViewOutput {
    /// Render in the requested format.
    pub fn render(&self, format: ViewFormat) -> String {
        match format {
            ViewFormat::Text => self.text.clone(),
            ViewFormat::Json => {
                serde_json::to_string_pretty(&self.data).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }
}

/// Direction of a Mermaid flowchart.
///
/// Parsed case-insensitively, with `TB` as an alias of `TD`, wherever it
/// appears (config files included).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FlowDirection {
    #[default]
    TD,
    LR,
    BT,
    RL,
}

impl FlowDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowDirection::TD => "TD",
            FlowDirection::LR => "LR",
            FlowDirection::BT => "BT",
            FlowDirection::RL => "RL",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowDirection {
    type Err = ObserveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TD" | "TB" => Ok(FlowDirection::TD),
            "LR" => Ok(FlowDirection::LR),
            "BT" => Ok(FlowDirection::BT),
            "RL" => Ok(FlowDirection::RL),
            _ => Err(ObserveError::UnknownDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for FlowDirection {
    type Error = ObserveError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<FlowDirection> for String {
    fn from(direction: FlowDirection) -> Self {
        direction.as_str().to_string()
    }
}

/// Layout knobs shared by the views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Outline indentation per depth level.
    pub indent: String,
    /// Maximum diagram label length in characters.
    pub label_width: usize,
    pub direction: FlowDirection,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            label_width: 40,
            direction: FlowDirection::default(),
        }
    }
}

/// Context passed to views for rendering.
pub struct RenderContext<'a> {
    pub options: &'a RenderOptions,
    /// Optional detector report used to annotate offending steps.
    pub validation: Option<&'a ChainValidation>,
}

impl<'a> RenderContext<'a> {
    /// A context with no annotations.
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            validation: None,
        }
    }

    /// Annotate the rendering with `validation`.
    pub fn with_validation(mut self, validation: &'a ChainValidation) -> Self {
        self.validation = Some(validation);
        self
    }
}

/// Trait for all chain views.
pub trait View {
    /// Render this view for the given chain and context.
    fn render(&self, chain: &ReasoningChain, ctx: &RenderContext<'_>) -> Result<ViewOutput>;

    /// The kind of view this is.
    fn kind(&self) -> ViewKind;
}

/// The view that renders `kind`.
pub fn view_for(kind: ViewKind) -> Box<dyn View> {
    match kind {
        ViewKind::Outline => Box::new(OutlineView),
        ViewKind::Diagram => Box::new(MermaidView),
    }
}

/// List all available view kinds.
pub fn available_views() -> &'static [ViewKind] {
    &[ViewKind::Outline, ViewKind::Diagram]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_view_kinds() {
        assert_eq!(ViewKind::parse("text").unwrap(), ViewKind::Outline);
        assert_eq!(ViewKind::parse("outline").unwrap(), ViewKind::Outline);
        assert_eq!(ViewKind::parse("mermaid").unwrap(), ViewKind::Diagram);
        assert_eq!(ViewKind::parse("diagram").unwrap(), ViewKind::Diagram);
    }

    #[test]
    fn parse_unknown_view() {
        assert!(ViewKind::parse("graphviz").is_err());
    }

    #[test]
    fn view_for_matches_kind() {
        for &kind in available_views() {
            assert_eq!(view_for(kind).kind(), kind);
            assert_eq!(ViewKind::parse(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn view_output_render_formats() {
        let output = ViewOutput {
            text: "flowchart TD".to_string(),
            data: serde_json::json!({"view": "mermaid"}),
        };
        assert_eq!(output.render(ViewFormat::Text), "flowchart TD");
        assert!(output.render(ViewFormat::Json).contains("\"view\""));
    }

    #[test]
    fn directions() {
        assert_eq!("lr".parse::<FlowDirection>().unwrap(), FlowDirection::LR);
        assert_eq!("TB".parse::<FlowDirection>().unwrap(), FlowDirection::TD);
        assert!("up".parse::<FlowDirection>().is_err());
        assert_eq!(FlowDirection::BT.to_string(), "BT");
    }

    #[test]
    fn options_default_and_partial_deserialize() {
        let opts = RenderOptions::default();
        assert_eq!(opts.indent, "  ");
        assert_eq!(opts.label_width, 40);
        assert_eq!(opts.direction, FlowDirection::TD);

        let partial: RenderOptions = serde_json::from_str(r#"{"direction":"lr"}"#).unwrap();
        assert_eq!(partial.direction, FlowDirection::LR);
        assert_eq!(partial.label_width, 40);

        let err = serde_json::from_str::<RenderOptions>(r#"{"direction":"up"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown flow direction: 'up'"));
        assert_eq!(serde_json::to_value(FlowDirection::RL).unwrap(), "RL");
    }
}
