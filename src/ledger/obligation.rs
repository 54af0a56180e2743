use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cadence of a recurring obligation. Only a monthly cycle is modeled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Frequency {
    #[default]
    Monthly,
}

/// A recurring fixed expense attached to a property: rent, a utility
/// contract, HOA dues, a service agreement. The obligation itself carries no
/// history; settled and upcoming cycles live in the ledger as entries linked
/// back through `reference_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obligation {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    /// Amount charged for the current cycle. Non-negative.
    pub amount: f64,
    /// Nominal day-of-month the obligation falls due, 1 through 31. Clamped
    /// to the target month's length whenever a concrete date is derived.
    pub due_day: u32,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_end: Option<NaiveDate>,
    /// Amount for cycles generated after the first; falls back to `amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_amount: Option<f64>,
}

impl Obligation {
    pub fn new(
        property_id: Uuid,
        name: impl Into<String>,
        provider: impl Into<String>,
        amount: f64,
        due_day: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_id,
            name: name.into(),
            provider: provider.into(),
            account_number: None,
            amount,
            due_day,
            frequency: Frequency::Monthly,
            contract_start: None,
            contract_end: None,
            recurring_amount: None,
        }
    }

    /// Amount charged for cycles generated after the first entry.
    pub fn effective_recurring_amount(&self) -> f64 {
        self.recurring_amount.unwrap_or(self.amount)
    }
}
