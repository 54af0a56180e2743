use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ledger::{statement, EntryKind, EntryStatus, Ledger, LedgerEntry, StatementLine};

use super::{obligation_service::ObligationService, ServiceError, ServiceResult};

/// Input for an ad-hoc entry recorded outside the obligation lifecycle,
/// e.g. billing a completed maintenance task to a property. `reference_id`
/// may point at the billing source; it is not an obligation link.
#[derive(Debug, Clone)]
pub struct ManualEntry {
    pub property_id: Uuid,
    pub kind: EntryKind,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub payee: Option<String>,
    pub reference_id: Option<Uuid>,
}

pub struct EntryService;

impl EntryService {
    pub fn add_manual(ledger: &mut Ledger, input: ManualEntry) -> ServiceResult<LedgerEntry> {
        if input.category.trim().is_empty() {
            return Err(ServiceError::Validation("Category is required".into()));
        }
        if input.amount <= 0.0 {
            return Err(ServiceError::Validation("Amount must be positive".into()));
        }
        if ledger.property(input.property_id).is_none() {
            return Err(ServiceError::PropertyNotFound(input.property_id));
        }
        let mut entry = LedgerEntry::new(
            input.property_id,
            input.kind,
            input.due_date,
            input.amount,
            input.category,
        );
        entry.description = input.description;
        entry.payee = input.payee;
        entry.reference_id = input.reference_id;
        debug!(entry = %entry.id, property = %entry.property_id, "recorded manual entry");
        ledger.add_entry(entry.clone());
        Ok(entry)
    }

    /// Applies field edits to an open entry. Settled entries are immutable;
    /// status changes go through `set_status`, and any status written by the
    /// closure is discarded.
    pub fn update<F>(ledger: &mut Ledger, id: Uuid, apply: F) -> ServiceResult<LedgerEntry>
    where
        F: FnOnce(&mut LedgerEntry),
    {
        let entry = ledger.entry_mut(id).ok_or(ServiceError::EntryNotFound(id))?;
        if !entry.is_open() {
            return Err(ServiceError::SettledEntry(id));
        }
        let status = entry.status;
        apply(entry);
        entry.status = status;
        let updated = entry.clone();
        ledger.touch();
        Ok(updated)
    }

    /// The status toggle exposed to calling layers. Clearing stamps
    /// `payment_date` (defaulting to the entry's due date); reopening a
    /// cleared entry drops it. Any other transition out of a settled state
    /// is refused. Clearing an entry generated from a live obligation also
    /// schedules the following cycle, so the ledger keeps a forward-looking
    /// pending entry once the current one is settled.
    pub fn set_status(
        ledger: &mut Ledger,
        id: Uuid,
        status: EntryStatus,
        payment_date: Option<NaiveDate>,
    ) -> ServiceResult<LedgerEntry> {
        let entry = ledger.entry_mut(id).ok_or(ServiceError::EntryNotFound(id))?;
        if !entry.status.can_transition_to(status) {
            return Err(ServiceError::SettledEntry(id));
        }
        let was_open = entry.is_open();
        match status {
            EntryStatus::Cleared => {
                let date = payment_date.unwrap_or(entry.due_date);
                entry.mark_cleared(date);
            }
            EntryStatus::Pending => entry.reopen(),
            other => entry.status = other,
        }
        let updated = entry.clone();
        ledger.touch();

        if was_open && status == EntryStatus::Cleared {
            if let Some(reference) = updated.reference_id {
                Self::schedule_follow_up(ledger, reference, &updated);
            }
        }
        info!(entry = %id, status = ?status, "entry status changed");
        Ok(updated)
    }

    pub fn get(ledger: &Ledger, id: Uuid) -> ServiceResult<&LedgerEntry> {
        ledger.entry(id).ok_or(ServiceError::EntryNotFound(id))
    }

    /// Raw, unordered entries for a property.
    pub fn property_ledger(ledger: &Ledger, property_id: Uuid) -> Vec<&LedgerEntry> {
        ledger.entries_for_property(property_id)
    }

    /// The projected bank-style statement for a property.
    pub fn statement(ledger: &Ledger, property_id: Uuid) -> Vec<StatementLine> {
        let entries: Vec<LedgerEntry> = ledger
            .entries
            .iter()
            .filter(|entry| entry.property_id == property_id)
            .cloned()
            .collect();
        statement::project(&entries)
    }

    /// Generates the next cycle's pending entry when the cleared entry came
    /// from an obligation that has no other open entry. References that do
    /// not resolve to an obligation (manual and task-billed entries) are
    /// left alone.
    fn schedule_follow_up(ledger: &mut Ledger, reference: Uuid, cleared: &LedgerEntry) {
        let Some(obligation) = ledger.obligation(reference).cloned() else {
            return;
        };
        let has_open = ledger
            .entries
            .iter()
            .any(|entry| entry.reference_id == Some(reference) && entry.is_open());
        if has_open {
            return;
        }
        let follow_up = ObligationService::next_entry(&obligation, cleared.due_date);
        debug!(
            obligation = %reference,
            due = %follow_up.due_date,
            "generated next cycle entry"
        );
        ledger.add_entry(follow_up);
    }
}
