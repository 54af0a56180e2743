use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

/// Settlement state of a ledger entry. Transitions are one-directional
/// except the pending/cleared toggle: an open entry may be flagged, settled,
/// or voided; a cleared entry may only be reopened to pending; a voided
/// entry is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryStatus {
    Pending,
    Cleared,
    Void,
    Overdue,
    Unpaid,
}

impl EntryStatus {
    /// Open entries are still awaiting settlement and remain mutable.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            EntryStatus::Pending | EntryStatus::Overdue | EntryStatus::Unpaid
        )
    }

    pub fn can_transition_to(self, next: EntryStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            EntryStatus::Pending | EntryStatus::Overdue | EntryStatus::Unpaid => true,
            EntryStatus::Cleared => next == EntryStatus::Pending,
            EntryStatus::Void => false,
        }
    }
}

/// A single dated income or expense record scoped to a property. Entries
/// generated from an obligation carry its id in `reference_id`; manual and
/// task-billed entries either leave it empty or point at the billing source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub property_id: Uuid,
    pub kind: EntryKind,
    /// Timestamp the record was created; statement order is derived from it.
    pub date: DateTime<Utc>,
    /// Calendar date the amount is owed.
    pub due_date: NaiveDate,
    pub amount: f64,
    /// Conventionally mirrors the originating obligation's name.
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<Uuid>,
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl LedgerEntry {
    pub fn new(
        property_id: Uuid,
        kind: EntryKind,
        due_date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            kind,
            date: Utc::now(),
            due_date,
            amount,
            category: category.into(),
            description: None,
            payee: None,
            reference_id: None,
            status: EntryStatus::Pending,
            payment_date: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_reference(mut self, reference_id: Uuid) -> Self {
        self.reference_id = Some(reference_id);
        self
    }

    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn mark_cleared(&mut self, payment_date: NaiveDate) {
        self.status = EntryStatus::Cleared;
        self.payment_date = Some(payment_date);
    }

    /// Reverts a cleared entry to pending and drops its payment date.
    pub fn reopen(&mut self) {
        self.status = EntryStatus::Pending;
        self.payment_date = None;
    }

    /// Signed contribution to a running balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }
}
