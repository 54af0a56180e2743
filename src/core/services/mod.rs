pub mod entry_service;
pub mod obligation_service;
pub mod property_service;

pub use entry_service::{EntryService, ManualEntry};
pub use obligation_service::{NewObligation, ObligationPatch, ObligationService};
pub use property_service::PropertyService;

use uuid::Uuid;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the service layer. Every operation validates before
/// it mutates, so a returned error always leaves the ledger unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),
    #[error("Obligation not found: {0}")]
    ObligationNotFound(Uuid),
    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),
    #[error("Entry {0} is settled and cannot be modified")]
    SettledEntry(Uuid),
}
