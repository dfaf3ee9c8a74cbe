//! Capabilities the controller needs from its host.

use async_trait::async_trait;

use crate::document::DocumentSelector;
use crate::provider::DynamicSymbolProvider;

/// Outcome of a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt<T> {
    Submitted(T),
    /// The user dismissed the prompt.
    Cancelled,
}

impl<T> Prompt<T> {
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Submitted(value) => Some(value),
            Self::Cancelled => None,
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Interactive prompts.
///
/// An `Err` means the host itself failed; a dismissed dialog is
/// [`Prompt::Cancelled`].
#[async_trait]
pub trait HostUi: Send {
    async fn prompt_text(
        &mut self,
        placeholder: Option<&str>,
        prefill: Option<&str>,
    ) -> anyhow::Result<Prompt<String>>;

    async fn prompt_choice(
        &mut self,
        options: &[String],
        placeholder: Option<&str>,
    ) -> anyhow::Result<Prompt<String>>;
}

/// A registration that can be torn down. Disposing twice is a no-op.
pub trait Disposable: Send {
    fn dispose(&mut self);
}

/// The host's document-symbol provider table.
pub trait Registry: Send {
    fn register(
        &mut self,
        selector: &DocumentSelector,
        provider: DynamicSymbolProvider,
    ) -> Box<dyn Disposable>;
}
