use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};
use uuid::Uuid;

use crate::ledger::{schedule, EntryKind, Ledger, LedgerEntry, Obligation};

use super::{ServiceError, ServiceResult};

/// Input for creating an obligation. `payment_date` is the first cycle's due
/// date; the obligation's nominal due day is derived from its day-of-month.
#[derive(Debug, Clone)]
pub struct NewObligation {
    pub property_id: Uuid,
    pub name: String,
    pub provider: String,
    pub account_number: Option<String>,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub contract_start: Option<NaiveDate>,
    pub contract_end: Option<NaiveDate>,
    pub recurring_amount: Option<f64>,
    /// Receipt reference proving the first cycle is already settled. When
    /// present the first entry is recorded cleared and the following cycle
    /// is generated up front.
    pub proof_of_payment: Option<String>,
}

impl NewObligation {
    pub fn new(
        property_id: Uuid,
        name: impl Into<String>,
        provider: impl Into<String>,
        amount: f64,
        payment_date: NaiveDate,
    ) -> Self {
        Self {
            property_id,
            name: name.into(),
            provider: provider.into(),
            account_number: None,
            amount,
            payment_date,
            contract_start: None,
            contract_end: None,
            recurring_amount: None,
            proof_of_payment: None,
        }
    }
}

/// Field changes applied by `edit`. `None` leaves a field untouched; the
/// nested options clear or replace the optional obligation fields.
#[derive(Debug, Clone, Default)]
pub struct ObligationPatch {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub account_number: Option<Option<String>>,
    pub amount: Option<f64>,
    pub due_day: Option<u32>,
    pub contract_start: Option<Option<NaiveDate>>,
    pub contract_end: Option<Option<NaiveDate>>,
    pub recurring_amount: Option<Option<f64>>,
}

/// Sole mutator keeping obligations and their generated ledger entries
/// consistent: first-entry generation on create, cascade onto open entries
/// on edit, open-entry cleanup on delete. Settled entries are never touched.
pub struct ObligationService;

impl ObligationService {
    pub fn create(
        ledger: &mut Ledger,
        input: NewObligation,
    ) -> ServiceResult<(Obligation, Vec<LedgerEntry>)> {
        Self::validate(&input)?;
        if ledger.property(input.property_id).is_none() {
            return Err(ServiceError::PropertyNotFound(input.property_id));
        }

        let mut obligation = Obligation::new(
            input.property_id,
            input.name,
            input.provider,
            input.amount,
            input.payment_date.day(),
        );
        obligation.account_number = input.account_number;
        obligation.contract_start = input.contract_start;
        obligation.contract_end = input.contract_end;
        obligation.recurring_amount = input.recurring_amount;

        let mut first = LedgerEntry::new(
            obligation.property_id,
            EntryKind::Expense,
            input.payment_date,
            obligation.amount,
            obligation.name.clone(),
        )
        .with_reference(obligation.id)
        .with_payee(obligation.provider.clone())
        .with_description(Self::describe(&obligation));

        let mut generated = Vec::new();
        if let Some(proof) = input.proof_of_payment {
            first.attachments.push(proof);
            first.mark_cleared(input.payment_date);
            let follow_up = Self::next_entry(&obligation, input.payment_date);
            generated.push(first);
            generated.push(follow_up);
        } else {
            generated.push(first);
        }

        info!(
            obligation = %obligation.id,
            property = %obligation.property_id,
            entries = generated.len(),
            "created obligation"
        );
        ledger.add_obligation(obligation.clone());
        for entry in &generated {
            ledger.add_entry(entry.clone());
        }
        Ok((obligation, generated))
    }

    /// Applies the patch to the obligation, then re-derives every open
    /// generated entry: the due date is re-clamped within its existing month
    /// against the new due day, and the descriptive and amount fields are
    /// overwritten to match. Returns the number of entries updated.
    pub fn edit(ledger: &mut Ledger, id: Uuid, patch: ObligationPatch) -> ServiceResult<usize> {
        Self::validate_patch(&patch)?;
        let obligation = ledger
            .obligation_mut(id)
            .ok_or(ServiceError::ObligationNotFound(id))?;

        if let Some(name) = patch.name {
            obligation.name = name;
        }
        if let Some(provider) = patch.provider {
            obligation.provider = provider;
        }
        if let Some(account_number) = patch.account_number {
            obligation.account_number = account_number;
        }
        if let Some(amount) = patch.amount {
            obligation.amount = amount;
        }
        if let Some(due_day) = patch.due_day {
            obligation.due_day = due_day;
        }
        if let Some(contract_start) = patch.contract_start {
            obligation.contract_start = contract_start;
        }
        if let Some(contract_end) = patch.contract_end {
            obligation.contract_end = contract_end;
        }
        if let Some(recurring_amount) = patch.recurring_amount {
            obligation.recurring_amount = recurring_amount;
        }
        let snapshot = obligation.clone();

        let mut updated = 0usize;
        for entry in ledger
            .entries
            .iter_mut()
            .filter(|entry| entry.reference_id == Some(id) && entry.is_open())
        {
            entry.due_date = schedule::resolve_due_date(entry.due_date, snapshot.due_day);
            entry.category = snapshot.name.clone();
            entry.amount = snapshot.amount;
            entry.payee = Some(snapshot.provider.clone());
            entry.description = Some(Self::describe(&snapshot));
            updated += 1;
        }
        ledger.touch();
        debug!(obligation = %id, updated, "cascaded obligation edit");
        Ok(updated)
    }

    /// Removes the obligation together with its open generated entries.
    /// Cleared entries stay behind as historical record. Returns the number
    /// of entries removed.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<usize> {
        if ledger.obligation(id).is_none() {
            return Err(ServiceError::ObligationNotFound(id));
        }
        ledger.obligations.retain(|obligation| obligation.id != id);
        let before = ledger.entries.len();
        ledger
            .entries
            .retain(|entry| !(entry.reference_id == Some(id) && entry.is_open()));
        let removed = before - ledger.entries.len();
        ledger.touch();
        info!(obligation = %id, removed, "removed obligation");
        Ok(removed)
    }

    pub fn get(ledger: &Ledger, id: Uuid) -> ServiceResult<&Obligation> {
        ledger
            .obligation(id)
            .ok_or(ServiceError::ObligationNotFound(id))
    }

    pub fn list(ledger: &Ledger, property_id: Uuid) -> Vec<&Obligation> {
        ledger.obligations_for_property(property_id)
    }

    /// Builds the following cycle's pending entry for an obligation, one
    /// calendar month after `reference` with the due day re-clamped.
    pub(crate) fn next_entry(obligation: &Obligation, reference: NaiveDate) -> LedgerEntry {
        let due = schedule::next_cycle(reference, obligation.due_day);
        LedgerEntry::new(
            obligation.property_id,
            EntryKind::Expense,
            due,
            obligation.effective_recurring_amount(),
            obligation.name.clone(),
        )
        .with_reference(obligation.id)
        .with_payee(obligation.provider.clone())
        .with_description(Self::describe(obligation))
    }

    fn describe(obligation: &Obligation) -> String {
        format!("{} ({})", obligation.name, obligation.provider)
    }

    fn validate(input: &NewObligation) -> ServiceResult<()> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::Validation("Name is required".into()));
        }
        if input.provider.trim().is_empty() {
            return Err(ServiceError::Validation("Provider is required".into()));
        }
        if input.amount <= 0.0 {
            return Err(ServiceError::Validation("Amount must be positive".into()));
        }
        Ok(())
    }

    fn validate_patch(patch: &ObligationPatch) -> ServiceResult<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(ServiceError::Validation("Name is required".into()));
            }
        }
        if let Some(provider) = &patch.provider {
            if provider.trim().is_empty() {
                return Err(ServiceError::Validation("Provider is required".into()));
            }
        }
        if let Some(amount) = patch.amount {
            if amount <= 0.0 {
                return Err(ServiceError::Validation("Amount must be positive".into()));
            }
        }
        if let Some(due_day) = patch.due_day {
            if !(1..=31).contains(&due_day) {
                return Err(ServiceError::Validation(
                    "Due day must be between 1 and 31".into(),
                ));
            }
        }
        Ok(())
    }
}
