//! Pattern sets persisted in the JSON config file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dynsym_core::{NamedPatternSet, NamedSetStore};
use tracing::{debug, info};

use crate::Config;

/// [`NamedSetStore`] over the `definitions` key of a config file.
///
/// Writes replace the whole file through a temporary sibling, so a failed
/// write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonSetStore {
    path: PathBuf,
}

impl JsonSetStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_config(&self) -> anyhow::Result<Config> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Config::parse(&content, &self.path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, starting empty", self.path.display());
                Ok(Config::default())
            }
            Err(e) => Err(anyhow::anyhow!("Cannot read {}: {e}", self.path.display())),
        }
    }

    async fn write_config(&self, config: &Config) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = config.to_json()?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl NamedSetStore for JsonSetStore {
    async fn get(&self) -> anyhow::Result<Vec<NamedPatternSet>> {
        Ok(self.read_config().await?.definitions)
    }

    async fn set(&self, sets: Vec<NamedPatternSet>) -> anyhow::Result<()> {
        let mut config = self.read_config().await?;
        config.definitions = sets;
        self.write_config(&config).await?;
        info!(
            "Wrote {} pattern sets to {}",
            config.definitions.len(),
            self.path.display()
        );
        Ok(())
    }
}
