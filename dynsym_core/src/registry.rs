//! In-process provider table.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::document::{DocumentSelector, TextDocument};
use crate::error::Result;
use crate::host::{Disposable, Registry};
use crate::provider::{DynamicSymbolProvider, SymbolInformation};

#[derive(Debug, Default)]
struct Table {
    next_id: u64,
    entries: Vec<(u64, DocumentSelector, DynamicSymbolProvider)>,
}

/// Registered providers, queried by document.
///
/// Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    table: Arc<Mutex<Table>>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Symbols from every live provider whose selector matches `document`.
    ///
    /// A provider with an invalid pattern contributes nothing.
    #[must_use]
    pub fn provide(&self, document: &TextDocument) -> Vec<SymbolInformation> {
        self.matching(document)
            .iter()
            .flat_map(|provider| provider.symbols_or_empty(document))
            .collect()
    }

    /// Like [`provide`](Self::provide), but fails on the first provider
    /// whose patterns do not compile.
    pub fn try_provide(&self, document: &TextDocument) -> Result<Vec<SymbolInformation>> {
        let mut symbols = Vec::new();
        for provider in self.matching(document) {
            symbols.extend(provider.provide_document_symbols(document)?);
        }
        Ok(symbols)
    }

    /// Snapshot so extraction runs without holding the lock.
    fn matching(&self, document: &TextDocument) -> Vec<DynamicSymbolProvider> {
        self.lock()
            .entries
            .iter()
            .filter(|(_, selector, _)| selector.matches(document))
            .map(|(_, _, provider)| provider.clone())
            .collect()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Pattern lists of the live providers, in registration order.
    #[must_use]
    pub fn live_patterns(&self) -> Vec<Vec<String>> {
        self.lock()
            .entries
            .iter()
            .map(|(_, _, provider)| provider.patterns().to_vec())
            .collect()
    }
}

impl Registry for ProviderRegistry {
    fn register(
        &mut self,
        selector: &DocumentSelector,
        provider: DynamicSymbolProvider,
    ) -> Box<dyn Disposable> {
        let mut table = self.lock();
        let id = table.next_id;
        table.next_id += 1;
        debug!("Registering provider {} for {:?}", id, selector.schemes);
        table.entries.push((id, selector.clone(), provider));

        Box::new(ProviderHandle {
            id,
            table: Some(Arc::clone(&self.table)),
        })
    }
}

/// Handle returned by [`ProviderRegistry`]; disposing removes the provider.
#[derive(Debug)]
pub struct ProviderHandle {
    id: u64,
    table: Option<Arc<Mutex<Table>>>,
}

impl Disposable for ProviderHandle {
    fn dispose(&mut self) {
        let Some(table) = self.table.take() else {
            return;
        };
        let mut table = table.lock().unwrap_or_else(PoisonError::into_inner);
        table.entries.retain(|(id, _, _)| *id != self.id);
        debug!("Disposed provider {}", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispose_removes_only_its_provider_once() {
        let mut registry = ProviderRegistry::new();
        let selector = DocumentSelector::files_and_untitled();
        let mut first =
            registry.register(&selector, DynamicSymbolProvider::new(&["a".to_string()]));
        let _second = registry.register(&selector, DynamicSymbolProvider::new(&["b".to_string()]));
        assert_eq!(registry.live_count(), 2);

        first.dispose();
        first.dispose();

        assert_eq!(registry.live_patterns(), vec![vec!["b".to_string()]]);
    }

    #[test]
    fn provide_skips_unmatched_schemes() {
        let mut registry = ProviderRegistry::new();
        let _handle = registry.register(
            &DocumentSelector::new(["file"]),
            DynamicSymbolProvider::new(&["^#".to_string()]),
        );

        assert_eq!(registry.provide(&TextDocument::new("file:///a.md", "# a")).len(), 1);
        assert!(registry.provide(&TextDocument::new("untitled:1", "# a")).is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn try_provide_reports_invalid_pattern() {
        let mut registry = ProviderRegistry::new();
        let _handle = registry.register(
            &DocumentSelector::files_and_untitled(),
            DynamicSymbolProvider::new(&["(".to_string()]),
        );
        let document = TextDocument::new("untitled:1", "( a");

        assert!(registry.provide(&document).is_empty());
        let err = registry
            .try_provide(&document)
            .expect_err("invalid pattern should fail");
        assert!(err.is_invalid_pattern());
    }
}
