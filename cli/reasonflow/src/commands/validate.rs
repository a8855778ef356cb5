//! `reasonflow validate`: run the fallacy detector over a chain file.

use std::path::Path;

use anyhow::Result;
use reasonflow_check::FallacyDetector;

use crate::commands::load_chain;

/// Validate the chain at `path`. Returns whether the chain is valid.
pub fn run(path: &Path, json: bool) -> Result<bool> {
    let chain = load_chain(path)?;
    let report = FallacyDetector::new().validate(&chain);

    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }

    Ok(report.is_valid)
}
