//! The document-symbol provider backed by a pattern list snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document::TextDocument;
use crate::error::Result;
use crate::extract::{SymbolRange, compile_patterns};

/// Kind reported to the host for every extracted symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub uri: String,
    pub range: SymbolRange,
}

/// Symbol record handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInformation {
    pub name: String,
    pub kind: SymbolKind,
    pub container_name: String,
    pub location: Location,
}

/// Provider over an immutable snapshot of the pattern list it was built from.
#[derive(Debug, Clone)]
pub struct DynamicSymbolProvider {
    patterns: Arc<[String]>,
}

impl DynamicSymbolProvider {
    #[must_use]
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns.into(),
        }
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Rescan `document` in full.
    pub fn provide_document_symbols(
        &self,
        document: &TextDocument,
    ) -> Result<Vec<SymbolInformation>> {
        let matcher = compile_patterns(&self.patterns)?;
        let symbols = matcher.extract(&document.lines());
        debug!("Extracted {} symbols from {}", symbols.len(), document.uri);

        Ok(symbols
            .into_iter()
            .map(|symbol| SymbolInformation {
                container_name: symbol.name.clone(),
                name: symbol.name,
                kind: SymbolKind::String,
                location: Location {
                    uri: document.uri.clone(),
                    range: symbol.range,
                },
            })
            .collect())
    }

    /// Host-facing entry point: an invalid pattern yields no symbols.
    #[must_use]
    pub fn symbols_or_empty(&self, document: &TextDocument) -> Vec<SymbolInformation> {
        match self.provide_document_symbols(document) {
            Ok(symbols) => symbols,
            Err(e) => {
                warn!("No symbols for {}: {e}", document.uri);
                Vec::new()
            }
        }
    }
}
