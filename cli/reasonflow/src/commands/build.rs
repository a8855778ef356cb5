//! `reasonflow build`: turn a loose chain spec into a chain file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use reasonflow_core::build_lenient;
use serde_json::Value;
use tracing::warn;

/// Build a chain from the loose document at `input` and write it as JSON.
pub fn run(input: &Path, output: Option<&Path>) -> Result<()> {
    let text = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let doc: Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", input.display()))?;
    if !doc.is_object() {
        bail!("{}: chain spec must be a JSON object", input.display());
    }

    let built = build_lenient(&doc).with_context(|| format!("building chain from {}", input.display()))?;
    for warning in &built.warnings {
        warn!("{warning}");
    }
    for skipped in &built.skipped {
        warn!(index = skipped.index, "skipping invalid step: {}", skipped.reason);
    }

    let dest = output.map(Path::to_path_buf).unwrap_or_else(|| default_output(input));
    let json = built.chain.to_json()?;
    fs::write(&dest, json).with_context(|| format!("writing {}", dest.display()))?;

    println!(
        "Built chain '{}' with {} step(s) -> {}",
        built.chain.title(),
        built.chain.len(),
        dest.display()
    );
    Ok(())
}

/// `spec.json` becomes `spec.chain.json` next to it.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("chain.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasonflow_core::ReasoningChain;

    #[test]
    fn default_output_replaces_extension() {
        assert_eq!(
            default_output(Path::new("dir/spec.json")),
            PathBuf::from("dir/spec.chain.json")
        );
        assert_eq!(default_output(Path::new("spec")), PathBuf::from("spec.chain.json"));
    }

    #[test]
    fn build_writes_loadable_chain() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("spec.json");
        fs::write(
            &input,
            r#"{"title":"T","steps":[
                {"step_id":"p1","content":"given","step_type":"premise"},
                {"step_id":"bad"},
                {"step_id":"c1","content":"so","step_type":"conclusion","depends_on":["p1"]}
            ]}"#,
        )
        .unwrap();

        run(&input, None).unwrap();
        let written = fs::read_to_string(dir.path().join("spec.chain.json")).unwrap();
        let chain = ReasoningChain::from_json(&written).unwrap();
        assert_eq!(chain.id(), "chain_1");
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn rejects_non_object_spec() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("spec.json");
        fs::write(&input, "[1, 2, 3]").unwrap();
        let err = run(&input, None).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }
}
