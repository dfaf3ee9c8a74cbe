#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Regex-driven document outlines.
//!
//! A user supplies an ordered list of patterns; every line matched by any of
//! them opens a section that runs until the next matched line. The
//! [`ActiveSetController`] keeps one live provider registered for the current
//! pattern list and persists named lists through a [`NamedSetStore`].

pub mod controller;
pub mod document;
pub mod error;
pub mod extract;
pub mod host;
pub mod pattern;
pub mod provider;
pub mod registry;
pub mod session;
pub mod store;

pub use controller::{ActiveSetController, Outcome, upsert_named_set};
pub use document::{DocumentSelector, TextDocument};
pub use error::{Error, Result};
pub use extract::{PatternMatcher, Symbol, SymbolRange, compile_patterns, extract};
pub use host::{Disposable, HostUi, Prompt, Registry};
pub use pattern::{NamedPatternSet, PatternDefinition};
pub use provider::{DynamicSymbolProvider, Location, SymbolInformation, SymbolKind};
pub use registry::{ProviderHandle, ProviderRegistry};
pub use session::SessionState;
pub use store::{MemorySetStore, NamedSetStore};
