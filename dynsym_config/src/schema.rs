use dynsym_core::NamedPatternSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Saved pattern sets, in the order the user created them.
    #[serde(default)]
    pub definitions: Vec<NamedPatternSet>,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Keys this version does not know about, kept across rewrites.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("dynsym"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Read the config at `path`; a missing file is an empty config.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    pub(crate) fn parse(content: &str, path: &Path) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))
    }

    pub(crate) fn to_json(&self) -> anyhow::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn create_config(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config_template = r#"{
  "definitions": [
    {
      "id": "markdown",
      "patterns": [
        { "ignoreCase": false, "isRegex": true, "pattern": "^#{1,6} .*" }
      ]
    },
    {
      "id": "python",
      "patterns": [
        { "ignoreCase": false, "isRegex": true, "pattern": "^\\s*class\\s+\\w+" },
        { "ignoreCase": false, "isRegex": true, "pattern": "^\\s*def\\s+\\w+" }
      ]
    }
  ],
  "log_filter": "warn"
}
"#;

        std::fs::write(path, config_template)?;

        println!("Created config file at: {}", path.display());
        println!();
        println!("Next steps:");
        println!("   1. Add your own pattern sets under \"definitions\"");
        println!("   2. Run 'dynsym outline <FILE> --set markdown' to try one");
        println!("   3. Run 'dynsym session <FILE>' to build sets interactively");
        println!();
        Ok(())
    }
}
