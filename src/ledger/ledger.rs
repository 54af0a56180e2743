use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{entry::LedgerEntry, obligation::Obligation, property::Property};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Aggregate owning the property directory, the obligation definitions and
/// the ledger entries for one managed portfolio. Collections are keyed by
/// entity id; per-property and per-reference lookups scan linearly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub obligations: Vec<Obligation>,
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            properties: Vec::new(),
            obligations: Vec::new(),
            entries: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_property(&mut self, property: Property) -> Uuid {
        let id = property.id;
        self.properties.push(property);
        self.touch();
        id
    }

    pub fn add_obligation(&mut self, obligation: Obligation) -> Uuid {
        let id = obligation.id;
        self.obligations.push(obligation);
        self.touch();
        id
    }

    pub fn add_entry(&mut self, entry: LedgerEntry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        self.touch();
        id
    }

    pub fn property(&self, id: Uuid) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    pub fn obligation(&self, id: Uuid) -> Option<&Obligation> {
        self.obligations.iter().find(|obligation| obligation.id == id)
    }

    pub fn obligation_mut(&mut self, id: Uuid) -> Option<&mut Obligation> {
        self.obligations
            .iter_mut()
            .find(|obligation| obligation.id == id)
    }

    pub fn entry(&self, id: Uuid) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entry_mut(&mut self, id: Uuid) -> Option<&mut LedgerEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    pub fn obligations_for_property(&self, property_id: Uuid) -> Vec<&Obligation> {
        self.obligations
            .iter()
            .filter(|obligation| obligation.property_id == property_id)
            .collect()
    }

    pub fn entries_for_property(&self, property_id: Uuid) -> Vec<&LedgerEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.property_id == property_id)
            .collect()
    }

    pub fn entries_for_reference(&self, reference_id: Uuid) -> Vec<&LedgerEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.reference_id == Some(reference_id))
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
