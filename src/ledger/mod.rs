//! Ledger domain models, scheduling helpers, and statement projection.

pub mod entry;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod obligation;
pub mod property;
pub mod schedule;
pub mod statement;

pub use entry::{EntryKind, EntryStatus, LedgerEntry};
pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
pub use obligation::{Frequency, Obligation};
pub use property::Property;
pub use statement::{project, StatementLine};
