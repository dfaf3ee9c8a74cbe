//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a separate strategy type with its own input, dispatched
//! statically from `main`.

use std::path::Path;

use dynsym_core::SymbolInformation;

mod init;
mod outline;
mod session;
mod sets;
mod version;

pub use init::InitStrategy;
pub use outline::{OutlineInput, OutlineStrategy};
pub use session::{SessionInput, SessionStrategy};
pub use sets::SetsStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, so
/// parameters are passed without runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// One outline entry per line: `start-end  name`, lines 1-based.
pub(crate) fn format_symbol(symbol: &SymbolInformation) -> String {
    let range = symbol.location.range;
    format!(
        "{}:{}-{}:{}  {}",
        range.start_line + 1,
        range.start_col,
        range.end_line + 1,
        range.end_col,
        symbol.name
    )
}

pub(crate) async fn read_document(path: &Path) -> anyhow::Result<dynsym_core::TextDocument> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
    Ok(dynsym_core::TextDocument::from_path(path, text))
}
