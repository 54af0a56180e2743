use tracing::info;

use crate::errors::LedgerError;
use crate::ledger::Ledger;
use crate::storage::{JsonStorage, StorageBackend};

/// Facade that coordinates the in-memory ledger with the persistence layer:
/// it owns the currently loaded ledger, its storage name, and the backend
/// used to read and write it.
pub struct LedgerManager {
    storage: Box<dyn StorageBackend>,
    current: Option<Ledger>,
    current_name: Option<String>,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            storage,
            current: None,
            current_name: None,
        }
    }

    pub fn with_default_storage() -> Result<Self, LedgerError> {
        Ok(Self::new(Box::new(JsonStorage::new_default()?)))
    }

    /// Creates a fresh ledger under `name` and persists it immediately.
    pub fn create(&mut self, name: &str) -> Result<&mut Ledger, LedgerError> {
        self.current = Some(Ledger::new(name));
        self.current_name = Some(name.to_string());
        self.save()?;
        info!(ledger = name, "created ledger");
        self.current_mut()
    }

    pub fn open(&mut self, name: &str) -> Result<&Ledger, LedgerError> {
        let ledger = self.storage.load(name)?;
        self.current = Some(ledger);
        self.current_name = Some(name.to_string());
        self.storage.record_last_ledger(Some(name))?;
        info!(ledger = name, "opened ledger");
        self.current()
    }

    /// Reopens whichever ledger was used last, if any.
    pub fn open_last(&mut self) -> Result<Option<&Ledger>, LedgerError> {
        match self.storage.last_ledger()? {
            Some(name) => self.open(&name).map(Some),
            None => Ok(None),
        }
    }

    pub fn save(&mut self) -> Result<(), LedgerError> {
        let name = self.current_name.clone().ok_or(LedgerError::NotLoaded)?;
        let ledger = self.current.as_mut().ok_or(LedgerError::NotLoaded)?;
        ledger.touch();
        self.storage.save(ledger, &name)?;
        self.storage.record_last_ledger(Some(&name))?;
        Ok(())
    }

    pub fn close(&mut self) {
        self.current = None;
        self.current_name = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Result<&Ledger, LedgerError> {
        self.current.as_ref().ok_or(LedgerError::NotLoaded)
    }

    pub fn current_mut(&mut self) -> Result<&mut Ledger, LedgerError> {
        self.current.as_mut().ok_or(LedgerError::NotLoaded)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }
}
