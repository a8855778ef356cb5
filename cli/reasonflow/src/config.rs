//! `reasonflow.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reasonflow_observe::RenderOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name searched for when no `--config` is given.
pub const CONFIG_FILE: &str = "reasonflow.toml";

/// The top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasonflowConfig {
    /// Rendering defaults for `visualize`.
    #[serde(default)]
    pub render: RenderOptions,
}

impl ReasonflowConfig {
    /// Load a configuration file from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::parse(&content).with_context(|| format!("parsing {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Search upward from `start_dir` for `reasonflow.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasonflow_observe::FlowDirection;

    #[test]
    fn parse_full_config() {
        let config = ReasonflowConfig::parse(
            r#"
[render]
indent = "    "
label_width = 24
direction = "LR"
"#,
        )
        .unwrap();
        assert_eq!(config.render.indent, "    ");
        assert_eq!(config.render.label_width, 24);
        assert_eq!(config.render.direction, FlowDirection::LR);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config = ReasonflowConfig::parse("[render]\nlabel_width = 10\n").unwrap();
        assert_eq!(config.render.indent, "  ");
        assert_eq!(config.render.direction, FlowDirection::TD);

        let empty = ReasonflowConfig::parse("").unwrap();
        assert_eq!(empty, ReasonflowConfig::default());
    }

    #[test]
    fn direction_is_case_insensitive() {
        let config = ReasonflowConfig::parse("[render]\ndirection = \"lr\"\n").unwrap();
        assert_eq!(config.render.direction, FlowDirection::LR);
        let config = ReasonflowConfig::parse("[render]\ndirection = \"tb\"\n").unwrap();
        assert_eq!(config.render.direction, FlowDirection::TD);
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(ReasonflowConfig::parse("this is not valid toml [[[").is_err());
        assert!(ReasonflowConfig::parse("[render]\ndirection = \"UP\"\n").is_err());
    }

    #[test]
    fn find_and_load_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[render]\nlabel_width = 12\n").unwrap();

        let (config, found_dir) = ReasonflowConfig::find_and_load(dir.path()).unwrap().unwrap();
        assert_eq!(config.render.label_width, 12);
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn find_and_load_in_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[render]\nindent = \"\\t\"\n").unwrap();
        let child = dir.path().join("chains").join("drafts");
        std::fs::create_dir_all(&child).unwrap();

        let (config, found_dir) = ReasonflowConfig::find_and_load(&child).unwrap().unwrap();
        assert_eq!(config.render.indent, "\t");
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReasonflowConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("reading"));
    }
}
