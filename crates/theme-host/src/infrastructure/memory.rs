//! In-memory collaborators for tests and embedding.
//!
//! [`MemoryPreferencesStore`] and [`MemoryThemeRegistry`] implement the
//! application ports without touching the disk.  Both can be told to fail
//! with a given message, and both can write to a shared [`CallJournal`] so a
//! test can assert the order in which the coordinator talked to them.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use theme_core::{PersistedSettings, ThemeDescriptor};

use crate::application::ports::{CollaboratorError, PreferencesStore, ThemeRegistry};

/// Ordered record of collaborator calls, shared between doubles.
#[derive(Debug, Clone, Default)]
pub struct CallJournal(Arc<Mutex<Vec<&'static str>>>);

impl CallJournal {
    fn record(&self, call: &'static str) {
        self.0.lock().expect("lock poisoned").push(call);
    }

    /// Calls recorded so far, oldest first.
    pub fn entries(&self) -> Vec<&'static str> {
        self.0.lock().expect("lock poisoned").clone()
    }
}

// ── Preferences ───────────────────────────────────────────────────────────────

/// A [`PreferencesStore`] backed by a mutex.
#[derive(Debug, Default)]
pub struct MemoryPreferencesStore {
    settings: Mutex<PersistedSettings>,
    /// Theme ids in the order they were stored (`""` when unset).
    history: Mutex<Vec<String>>,
    load_error: Option<String>,
    store_error: Option<String>,
    journal: Option<CallJournal>,
}

impl MemoryPreferencesStore {
    /// Creates a store holding `settings`.
    pub fn new(settings: PersistedSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
            ..Self::default()
        }
    }

    /// Makes every `load` fail with `message`.
    pub fn fail_load(mut self, message: impl Into<String>) -> Self {
        self.load_error = Some(message.into());
        self
    }

    /// Makes every `store` fail with `message`.
    pub fn fail_store(mut self, message: impl Into<String>) -> Self {
        self.store_error = Some(message.into());
        self
    }

    /// Records calls in `journal`.
    pub fn with_journal(mut self, journal: CallJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// The currently committed settings.
    pub fn current(&self) -> PersistedSettings {
        self.settings.lock().expect("lock poisoned").clone()
    }

    /// Number of successful `store` calls.
    pub fn store_count(&self) -> usize {
        self.history.lock().expect("lock poisoned").len()
    }

    /// Theme ids stored so far, oldest first.
    pub fn stored_history(&self) -> Vec<String> {
        self.history.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl PreferencesStore for MemoryPreferencesStore {
    async fn load(&self) -> Result<PersistedSettings, CollaboratorError> {
        if let Some(journal) = &self.journal {
            journal.record("preferences.load");
        }
        match &self.load_error {
            Some(message) => Err(CollaboratorError::Preferences(message.clone())),
            None => Ok(self.current()),
        }
    }

    async fn store(&self, settings: &PersistedSettings) -> Result<(), CollaboratorError> {
        if let Some(journal) = &self.journal {
            journal.record("preferences.store");
        }
        if let Some(message) = &self.store_error {
            return Err(CollaboratorError::Preferences(message.clone()));
        }

        // Both locks are held together so `history` and `settings` agree on
        // which store came last.
        let mut current = self.settings.lock().expect("lock poisoned");
        let mut history = self.history.lock().expect("lock poisoned");
        *current = settings.clone();
        history.push(settings.theme.clone().unwrap_or_default());
        Ok(())
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// A [`ThemeRegistry`] returning a fixed list.
#[derive(Debug, Default)]
pub struct MemoryThemeRegistry {
    themes: Option<Vec<ThemeDescriptor>>,
    error: Option<String>,
    journal: Option<CallJournal>,
}

impl MemoryThemeRegistry {
    /// A registry listing `themes`.
    pub fn new(themes: Vec<ThemeDescriptor>) -> Self {
        Self {
            themes: Some(themes),
            ..Self::default()
        }
    }

    /// A registry that does not exist yet (`load` returns `None`).
    pub fn absent() -> Self {
        Self::default()
    }

    /// A registry whose `load` always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Records calls in `journal`.
    pub fn with_journal(mut self, journal: CallJournal) -> Self {
        self.journal = Some(journal);
        self
    }
}

#[async_trait]
impl ThemeRegistry for MemoryThemeRegistry {
    async fn load(&self) -> Result<Option<Vec<ThemeDescriptor>>, CollaboratorError> {
        if let Some(journal) = &self.journal {
            journal.record("registry.load");
        }
        match &self.error {
            Some(message) => Err(CollaboratorError::Registry(message.clone())),
            None => Ok(self.themes.clone()),
        }
    }
}
