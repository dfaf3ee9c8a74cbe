//! Interactive pattern-set session against one file.
//!
//! The five pattern-set commands are registered as the session's baseline
//! subscriptions; the controller only ever adds and removes the single
//! symbol provider above them.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use dynsym_config::JsonSetStore;
use dynsym_core::{
    ActiveSetController, Disposable, MemorySetStore, NamedSetStore, Outcome, ProviderRegistry,
};
use tracing::{debug, info};

use super::{format_symbol, read_document};
use crate::terminal::TerminalUi;

/// Commands that drive the controller, in the order they are registered.
pub const SESSION_COMMANDS: [&str; 5] = ["new", "add", "fix", "load", "save"];

const HELP: &str = "\
Commands:
  new   start a new pattern set from one pattern (empty clears it)
  add   append a pattern
  fix   edit or remove a pattern
  load  load a saved pattern set
  save  save the current patterns under a name
  show  print the outline of the file
  list  print the current patterns
  help  show this help
  quit  end the session";

/// Input parameters for the Session command strategy.
#[derive(Debug, Clone)]
pub struct SessionInput {
    pub file: PathBuf,
    pub config_path: PathBuf,
    /// Keep saved sets in memory for this session only.
    pub ephemeral: bool,
}

/// Strategy for the interactive session.
#[derive(Debug, Clone, Copy)]
pub struct SessionStrategy;

impl super::CommandStrategy for SessionStrategy {
    type Input = SessionInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        // Fail early on an unreadable file rather than at the first `show`.
        read_document(&input.file).await?;

        let store = session_store(&input);
        let stdin = std::io::BufReader::new(std::io::stdin());
        let ui = TerminalUi::new(stdin, std::io::stdout());
        run_session(ui, &input.file, store.as_ref()).await
    }
}

fn session_store(input: &SessionInput) -> Box<dyn NamedSetStore> {
    if input.ephemeral {
        info!("Starting ephemeral session on {}", input.file.display());
        Box::new(MemorySetStore::default())
    } else {
        info!(
            "Starting session on {} (sets in {})",
            input.file.display(),
            input.config_path.display()
        );
        Box::new(JsonSetStore::new(&input.config_path))
    }
}

/// Stand-in for a registered command handler.
struct CommandRegistration {
    name: &'static str,
    active: bool,
}

impl Disposable for CommandRegistration {
    fn dispose(&mut self) {
        if std::mem::take(&mut self.active) {
            debug!("Unregistered command {}", self.name);
        }
    }
}

fn command_registrations() -> Vec<Box<dyn Disposable>> {
    SESSION_COMMANDS
        .iter()
        .map(|&name| Box::new(CommandRegistration { name, active: true }) as Box<dyn Disposable>)
        .collect()
}

pub(crate) async fn run_session<R, W, S>(
    ui: TerminalUi<R, W>,
    file: &Path,
    store: &S,
) -> anyhow::Result<()>
where
    R: BufRead + Send,
    W: Write + Send,
    S: NamedSetStore + ?Sized,
{
    let registry = ProviderRegistry::new();
    let mut ctl = ActiveSetController::new(ui, registry.clone(), command_registrations());
    ctl.ui_mut().say(HELP)?;

    while let Some(command) = ctl.ui_mut().read_command()? {
        let result = match command.as_str() {
            "" => continue,
            "new" => ctl.define().await,
            "add" => ctl.add().await,
            "fix" => ctl.fix().await,
            "load" => ctl.load(store).await,
            "save" => ctl.save(store).await,
            "show" => {
                let lines: Vec<String> = match read_document(file).await {
                    Ok(document) => match registry.try_provide(&document) {
                        Ok(symbols) => symbols.iter().map(format_symbol).collect(),
                        Err(e) => vec![format!("Error: {e}")],
                    },
                    Err(e) => vec![format!("Error: {e}")],
                };
                if lines.is_empty() {
                    ctl.ui_mut().say("(no symbols)")?;
                }
                for line in lines {
                    ctl.ui_mut().say(&line)?;
                }
                continue;
            }
            "list" => {
                let listing = describe(ctl.current());
                ctl.ui_mut().say(&listing)?;
                continue;
            }
            "help" => {
                ctl.ui_mut().say(HELP)?;
                continue;
            }
            "quit" | "exit" | "q" => break,
            other => {
                ctl.ui_mut()
                    .say(&format!("Unknown command: {other}. Type 'help'."))?;
                continue;
            }
        };

        let message = match result {
            Ok(Outcome::Applied) if command == "save" => "Saved.".to_string(),
            Ok(Outcome::Applied) => describe(ctl.current()),
            Ok(Outcome::Cancelled) => "Cancelled.".to_string(),
            Ok(Outcome::Skipped) => "Nothing to do.".to_string(),
            Err(e) => format!("Error: {e}"),
        };
        ctl.ui_mut().say(&message)?;
    }

    ctl.shutdown();
    Ok(())
}

fn describe(patterns: &[String]) -> String {
    if patterns.is_empty() {
        return "No patterns.".to_string();
    }
    let mut out = String::from("Patterns:");
    for pattern in patterns {
        out.push_str("\n  ");
        out.push_str(pattern);
    }
    out
}
