//! Outline view: the chain as an indented text listing.

use reasonflow_check::Severity;
use reasonflow_core::{ChainLayout, ReasoningChain};
use serde_json::json;

use crate::error::Result;
use crate::format::percent;
use crate::view::{RenderContext, View, ViewKind, ViewOutput};

/// Indented outline, one line per step in dependency order.
///
/// ```text
/// Chain: Socrates (id=s)
///
/// [PREMISE] [100%] p1: All men are mortal.
///   [CONCLUSION] [100%] c1: Socrates is mortal.
/// ```
pub struct OutlineView;

impl View for OutlineView {
    fn kind(&self) -> ViewKind {
        ViewKind::Outline
    }

    fn render(&self, chain: &ReasoningChain, ctx: &RenderContext<'_>) -> Result<ViewOutput> {
        let layout = ChainLayout::compute(chain);
        let indent = ctx.options.indent.as_str();

        let mut lines = vec![format!("Chain: {} (id={})", chain.title(), chain.id())];
        if let Some(description) = chain.description() {
            lines.push(format!("Description: {description}"));
        }
        lines.push(String::new());

        let mut steps = Vec::with_capacity(chain.len());
        for (step, depth) in layout.iter() {
            let prefix = indent.repeat(depth);
            lines.push(format!(
                "{prefix}[{}] [{}] {}: {}",
                step.kind(),
                percent(step.confidence()),
                step.id(),
                step.content()
            ));
            if let Some(notes) = step.notes() {
                lines.push(format!("{prefix}  NOTE: {notes}"));
            }

            let mut issues = Vec::new();
            if let Some(validation) = ctx.validation {
                for issue in validation.issues_for(step.id()) {
                    let label = match issue.severity {
                        Severity::Error => "ERROR",
                        Severity::Warning => "WARN",
                    };
                    lines.push(format!("{prefix}  {label}: {}", issue.message));
                    issues.push(issue.issue_id.clone());
                }
            }

            steps.push(json!({
                "step_id": step.id(),
                "step_type": step.kind().as_str(),
                "depth": depth,
                "confidence": step.confidence(),
                "issues": issues,
            }));
        }

        let data = json!({
            "view": ViewKind::Outline.name(),
            "chain_id": chain.id(),
            "title": chain.title(),
            "max_depth": layout.max_depth(),
            "steps": steps,
        });

        Ok(ViewOutput {
            text: lines.join("\n"),
            data,
        })
    }
}
