//! The active pattern set and its single live provider registration.
//!
//! Every operation awaits all of its prompts before touching any state, so a
//! cancelled or failed operation has no observable effect. Whenever the
//! pattern list changes, the live registration is disposed first and a fresh
//! provider is registered only if the new list is non-empty.

use tracing::{debug, info};

use crate::document::DocumentSelector;
use crate::error::{Error, Result};
use crate::host::{Disposable, HostUi, Prompt, Registry};
use crate::pattern::NamedPatternSet;
use crate::provider::DynamicSymbolProvider;
use crate::session::SessionState;
use crate::store::NamedSetStore;

/// What an operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed (or, for `save`, the store was written).
    Applied,
    /// A prompt was dismissed or answered with nothing usable.
    Cancelled,
    /// Nothing to operate on; no prompt was shown.
    Skipped,
}

pub struct ActiveSetController<U, R> {
    ui: U,
    registry: R,
    selector: DocumentSelector,
    state: SessionState,
}

impl<U: HostUi, R: Registry> ActiveSetController<U, R> {
    /// `subscriptions` are the host registrations that exist before any
    /// pattern set is defined; they are never disposed by the controller.
    #[must_use]
    pub fn new(ui: U, registry: R, subscriptions: Vec<Box<dyn Disposable>>) -> Self {
        Self {
            ui,
            registry,
            selector: DocumentSelector::files_and_untitled(),
            state: SessionState::new(subscriptions),
        }
    }

    #[must_use]
    pub fn with_selector(mut self, selector: DocumentSelector) -> Self {
        self.selector = selector;
        self
    }

    #[must_use]
    pub fn current(&self) -> &[String] {
        self.state.current()
    }

    #[must_use]
    pub fn has_live_registration(&self) -> bool {
        self.state.has_live_registration()
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.state.subscription_count()
    }

    #[must_use]
    pub const fn baseline(&self) -> usize {
        self.state.baseline()
    }

    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    #[must_use]
    pub const fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Start a new set from a single pattern. An empty answer clears the set.
    pub async fn define(&mut self) -> Result<Outcome> {
        let Some(pattern) = self.text(Some("Pattern for a new set"), None).await? else {
            debug!("define cancelled");
            return Ok(Outcome::Cancelled);
        };

        if pattern.is_empty() {
            self.state.replace_current(Vec::new());
        } else {
            self.state.replace_current(vec![pattern]);
        }
        self.swap_registration();
        Ok(Outcome::Applied)
    }

    /// Append a pattern to the current set.
    pub async fn add(&mut self) -> Result<Outcome> {
        let pattern = self.text(Some("Pattern to add"), None).await?;
        let Some(pattern) = pattern.filter(|p| !p.is_empty()) else {
            debug!("add cancelled");
            return Ok(Outcome::Cancelled);
        };

        self.state.current_mut().push(pattern);
        self.swap_registration();
        Ok(Outcome::Applied)
    }

    /// Replace one pattern of the current set; an empty replacement removes it.
    ///
    /// The target is looked up by value, first occurrence wins.
    pub async fn fix(&mut self) -> Result<Outcome> {
        if self.state.current().is_empty() {
            debug!("fix skipped: no current patterns");
            return Ok(Outcome::Skipped);
        }

        let options = self.state.current().to_vec();
        let target = self.choice(&options, Some("Pattern to fix")).await?;
        let Some((index, target)) = target.and_then(|t| {
            options.iter().position(|p| *p == t).map(|index| (index, t))
        }) else {
            debug!("fix cancelled at selection");
            return Ok(Outcome::Cancelled);
        };

        let Some(replacement) = self
            .text(Some("Replacement (empty removes)"), Some(target.as_str()))
            .await?
        else {
            debug!("fix cancelled at replacement");
            return Ok(Outcome::Cancelled);
        };

        let current = self.state.current_mut();
        if replacement.is_empty() {
            current.remove(index);
            info!("Removed pattern {:?}", target);
        } else {
            info!("Replaced pattern {:?} with {:?}", target, replacement);
            current[index] = replacement;
        }
        self.swap_registration();
        Ok(Outcome::Applied)
    }

    /// Replace the current set with a saved one.
    pub async fn load<S>(&mut self, store: &S) -> Result<Outcome>
    where
        S: NamedSetStore + ?Sized,
    {
        let sets = store.get().await.map_err(Error::StoreUnavailable)?;
        if sets.is_empty() {
            debug!("load skipped: no saved sets");
            return Ok(Outcome::Skipped);
        }

        let ids: Vec<String> = sets.iter().map(|set| set.id.clone()).collect();
        let chosen = self.choice(&ids, Some("Pattern set to load")).await?;
        let Some(set) = chosen.and_then(|id| sets.into_iter().find(|set| set.id == id)) else {
            debug!("load cancelled");
            return Ok(Outcome::Cancelled);
        };

        info!("Loaded pattern set {:?} ({} patterns)", set.id, set.patterns.len());
        self.state.replace_current(set.pattern_texts());
        self.swap_registration();
        Ok(Outcome::Applied)
    }

    /// Save the current set under a user-supplied id, replacing a set with
    /// the same id in place.
    pub async fn save<S>(&mut self, store: &S) -> Result<Outcome>
    where
        S: NamedSetStore + ?Sized,
    {
        if self.state.current().is_empty() {
            debug!("save skipped: no current patterns");
            return Ok(Outcome::Skipped);
        }

        let id = self.text(Some("Name for this pattern set"), None).await?;
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            debug!("save cancelled");
            return Ok(Outcome::Cancelled);
        };

        let mut sets = store.get().await.map_err(Error::StoreUnavailable)?;
        let replaced = upsert_named_set(
            &mut sets,
            NamedPatternSet::from_patterns(id.as_str(), self.state.current()),
        );
        store.set(sets).await.map_err(Error::StoreUnavailable)?;

        info!(
            "Saved pattern set {:?} ({})",
            id,
            if replaced { "replaced" } else { "new" }
        );
        Ok(Outcome::Applied)
    }

    /// End the session, disposing the live registration and every baseline
    /// subscription.
    pub fn shutdown(self) {
        self.state.shutdown();
    }

    fn swap_registration(&mut self) {
        self.state.dispose_live();

        let current = self.state.current();
        if current.is_empty() {
            info!("Pattern set cleared, no provider registered");
            return;
        }

        let provider = DynamicSymbolProvider::new(current);
        let handle = self.registry.register(&self.selector, provider);
        info!("Registered symbol provider for {} patterns", current.len());
        self.state.install(handle);
    }

    async fn text(
        &mut self,
        placeholder: Option<&str>,
        prefill: Option<&str>,
    ) -> Result<Option<String>> {
        let prompt = self
            .ui
            .prompt_text(placeholder, prefill)
            .await
            .map_err(Error::Host)?;
        Ok(prompt.into_option())
    }

    /// An empty choice is treated the same as a dismissed one.
    async fn choice(
        &mut self,
        options: &[String],
        placeholder: Option<&str>,
    ) -> Result<Option<String>> {
        let prompt = self
            .ui
            .prompt_choice(options, placeholder)
            .await
            .map_err(Error::Host)?;
        Ok(match prompt {
            Prompt::Submitted(choice) if !choice.is_empty() => Some(choice),
            _ => None,
        })
    }
}

/// Insert `set`, or replace the entry with the same id in place.
///
/// Returns `true` when an existing entry was replaced.
pub fn upsert_named_set(sets: &mut Vec<NamedPatternSet>, set: NamedPatternSet) -> bool {
    if let Some(existing) = sets.iter_mut().find(|s| s.id == set.id) {
        *existing = set;
        true
    } else {
        sets.push(set);
        false
    }
}
