//! Diagram view: the chain as a Mermaid flowchart.

use reasonflow_check::Severity;
use reasonflow_core::{topological_order, ReasoningChain, StepKind};
use serde_json::json;

use crate::error::Result;
use crate::format::{escape_label, sanitize_id, truncate};
use crate::view::{RenderContext, View, ViewKind, ViewOutput};

const ERROR_CLASS: &str = "issueError";
const WARNING_CLASS: &str = "issueWarning";

/// Mermaid `flowchart` with one node per step and one edge per dependency.
pub struct MermaidView;

/// Opening and closing brackets of the node shape for `kind`.
pub fn node_shape(kind: StepKind) -> (&'static str, &'static str) {
    match kind {
        StepKind::Premise => ("([", "])"),
        StepKind::Inference => ("[", "]"),
        StepKind::Assumption => ("{", "}"),
        StepKind::Conclusion => ("((", "))"),
        StepKind::Evidence => ("[/", "/]"),
        StepKind::Rebuttal => ("[\\ ", " \\]"),
    }
}

impl View for MermaidView {
    fn kind(&self) -> ViewKind {
        ViewKind::Diagram
    }

    fn render(&self, chain: &ReasoningChain, ctx: &RenderContext<'_>) -> Result<ViewOutput> {
        let order = topological_order(chain);
        let width = ctx.options.label_width;

        let mut lines = vec![
            format!("flowchart {}", ctx.options.direction),
            format!("    %% {}", chain.title()),
        ];
        let mut nodes = Vec::with_capacity(order.len());

        for step in &order {
            let node = sanitize_id(step.id());
            let label = escape_label(&truncate(step.content(), width));
            let (open, close) = node_shape(step.kind());
            let class = ctx
                .validation
                .and_then(|v| v.worst_severity(step.id()))
                .map(|severity| match severity {
                    Severity::Error => ERROR_CLASS,
                    Severity::Warning => WARNING_CLASS,
                });
            let suffix = class.map(|c| format!(":::{c}")).unwrap_or_default();
            lines.push(format!("    {node}{open}\"{label}\"{close}{suffix}"));
            nodes.push(json!({
                "step_id": step.id(),
                "node": node,
                "step_type": step.kind().as_str(),
                "class": class,
            }));
        }

        let mut edges = Vec::new();
        for step in &order {
            let to = sanitize_id(step.id());
            for dep in step.depends_on() {
                let from = sanitize_id(dep);
                lines.push(format!("    {from} --> {to}"));
                edges.push(json!({ "from": from, "to": to }));
            }
        }

        if ctx.validation.is_some() {
            lines.push(format!(
                "    classDef {ERROR_CLASS} fill:#fdecea,stroke:#d32f2f,stroke-width:2px"
            ));
            lines.push(format!(
                "    classDef {WARNING_CLASS} fill:#fff8e1,stroke:#f9a825,stroke-width:2px"
            ));
        }

        let data = json!({
            "view": ViewKind::Diagram.name(),
            "chain_id": chain.id(),
            "direction": ctx.options.direction.as_str(),
            "nodes": nodes,
            "edges": edges,
        });

        Ok(ViewOutput {
            text: lines.join("\n"),
            data,
        })
    }
}
