//! Running-balance projection over a collection of ledger entries.

use serde::{Deserialize, Serialize};

use super::entry::LedgerEntry;

/// A ledger entry annotated with the cumulative balance at its position in
/// chronological order. The balance is fixed at accumulation time and
/// travels with the line, so callers may re-order the result for display
/// without recomputing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementLine {
    pub entry: LedgerEntry,
    pub running_balance: f64,
}

/// Projects entries into a bank-style statement. Entries are stable-sorted
/// by record timestamp ascending; entries sharing a timestamp keep their
/// incoming relative order (there is no secondary sort key, by policy). The
/// balance starts at zero, income adds and expenses subtract. Empty input
/// yields empty output.
pub fn project(entries: &[LedgerEntry]) -> Vec<StatementLine> {
    let mut ordered: Vec<&LedgerEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.date);

    let mut balance = 0.0;
    ordered
        .into_iter()
        .map(|entry| {
            balance += entry.signed_amount();
            StatementLine {
                entry: entry.clone(),
                running_balance: balance,
            }
        })
        .collect()
}
