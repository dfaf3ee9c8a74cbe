use std::path::PathBuf;

use dynsym_config::JsonSetStore;
use dynsym_core::NamedSetStore;

/// Strategy for listing saved pattern sets.
#[derive(Debug, Clone, Copy)]
pub struct SetsStrategy;

impl super::CommandStrategy for SetsStrategy {
    type Input = PathBuf;

    async fn execute(&self, config_path: Self::Input) -> anyhow::Result<()> {
        let store = JsonSetStore::new(&config_path);
        let sets = store.get().await?;

        if sets.is_empty() {
            println!("No saved pattern sets in {}", config_path.display());
            return Ok(());
        }

        for set in &sets {
            println!("{}:", set.id);
            for definition in &set.patterns {
                println!("  {}", definition.pattern);
            }
        }
        Ok(())
    }
}
