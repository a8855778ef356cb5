//! `reasonflow visualize`: render a chain as an outline or diagram.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reasonflow_check::FallacyDetector;
use reasonflow_observe::{view_for, RenderContext, RenderOptions, ViewFormat, ViewKind};

use crate::commands::load_chain;

/// Render the chain at `path` with the view named by `format`, as text or as
/// the view's JSON projection.
pub fn run(
    path: &Path,
    format: &str,
    export: ViewFormat,
    output: Option<&Path>,
    annotate: bool,
    options: &RenderOptions,
) -> Result<()> {
    let kind = ViewKind::parse(format)?;
    let chain = load_chain(path)?;

    let validation = annotate.then(|| FallacyDetector::new().validate(&chain));
    let mut ctx = RenderContext::new(options);
    if let Some(validation) = &validation {
        ctx = ctx.with_validation(validation);
    }

    let rendered = view_for(kind)
        .render(&chain, &ctx)
        .with_context(|| format!("rendering {}", path.display()))?;

    let body = rendered.render(export);
    match output {
        Some(dest) => {
            fs::write(dest, &body)
                .with_context(|| format!("writing {}", dest.display()))?;
            println!("Wrote {} view to {}", kind.name(), dest.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}
