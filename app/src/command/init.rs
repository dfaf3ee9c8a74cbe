use std::path::PathBuf;

use dynsym_config::Config;

/// Strategy for initializing the configuration.
///
/// Writes a config template with two example pattern sets.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = PathBuf;

    async fn execute(&self, config_path: Self::Input) -> anyhow::Result<()> {
        Config::create_config(&config_path)
    }
}
