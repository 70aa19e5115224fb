//! Stored-vs-ledger balance audit.
//!
//! Recomputes every active account's balance from posted history and
//! flags divergence from the account's stored balance. Runs entirely in
//! each account's native currency: no conversion, no rate dependency.

use rust_decimal::Decimal;
use tracing::debug;

use crate::balance::LineIndex;
use crate::chart::AccountRegistry;

use super::types::{ContributingEntry, DiscrepancyRecord};

/// Default tolerance: 0.01 currency units.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Audits stored balances against ledger-derived balances.
#[derive(Debug, Clone, Copy)]
pub struct DiscrepancyDetector {
    tolerance: Decimal,
}

impl Default for DiscrepancyDetector {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl DiscrepancyDetector {
    /// Creates a detector with the given absolute tolerance.
    #[must_use]
    pub const fn new(tolerance: Decimal) -> Self {
        Self { tolerance }
    }

    /// Scans every active account and returns the mismatches found.
    ///
    /// Never fails; inactive accounts are skipped, clean accounts
    /// produce nothing.
    #[must_use]
    pub fn scan(&self, registry: &AccountRegistry, lines: &LineIndex) -> Vec<DiscrepancyRecord> {
        let records: Vec<DiscrepancyRecord> = registry
            .iter()
            .filter(|account| account.is_active)
            .filter_map(|account| {
                let mut entries = Vec::new();
                let mut movement = Decimal::ZERO;
                for line in lines.for_account(account.id) {
                    if !line.status.is_posted() {
                        continue;
                    }
                    let net_impact = line.net_movement(account.nature);
                    movement += net_impact;
                    entries.push(ContributingEntry {
                        entry_date: line.entry_date,
                        reference: line.reference.clone(),
                        debit: line.debit,
                        credit: line.credit,
                        net_impact,
                    });
                }

                let ledger_balance = account.opening_balance + movement;
                let difference = account.cached_balance - ledger_balance;
                if difference.abs() <= self.tolerance {
                    return None;
                }
                Some(DiscrepancyRecord {
                    account_id: account.id,
                    code: account.code.clone(),
                    name: account.name.clone(),
                    stored_balance: account.cached_balance,
                    ledger_balance,
                    difference,
                    entries,
                })
            })
            .collect();

        debug!(
            accounts = registry.len(),
            discrepancies = records.len(),
            "balance audit complete"
        );
        records
    }
}
