//! Hierarchical balance aggregation.
//!
//! Rolls posting balances up the account tree: an account's aggregated
//! balance is its own posting balance plus the aggregated balances of
//! all its children. Memoized per build; a visiting set guards against
//! malformed (cyclic) hierarchies.

use std::collections::{HashMap, HashSet};

use branchbook_shared::types::AccountId;
use tracing::warn;

use crate::chart::AccountRegistry;

use super::error::BalanceError;
use super::posting::PostingBalanceCalculator;
use super::types::{AggregatedBalance, LineIndex, PostingFilter};

/// Non-fatal conditions observed during one aggregation build.
///
/// These are data, not errors: the build completes, but affected
/// subtrees were recovered rather than computed normally.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BuildDiagnostics {
    /// Accounts caught in a parent cycle: traversal re-entries whose
    /// subtree contribution was zeroed, plus accounts unreachable from
    /// any root because their parent chain loops.
    pub cycles: Vec<AccountId>,
    /// Accounts adopted as roots because their parent was missing.
    pub orphans: Vec<AccountId>,
}

impl BuildDiagnostics {
    /// Returns true if the hierarchy was well formed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.cycles.is_empty() && self.orphans.is_empty()
    }
}

/// Recursive roll-up of posting balances over the account tree.
///
/// The memo cache and cycle guard are scoped to one engine instance, and
/// an engine is scoped to one report build. Sharing an engine across
/// builds would serve balances computed against another build's currency
/// and window.
pub struct AggregationEngine<'a> {
    registry: &'a AccountRegistry,
    calculator: PostingBalanceCalculator<'a>,
    lines: &'a LineIndex,
    filter: PostingFilter,
    memo: HashMap<AccountId, AggregatedBalance>,
    visiting: HashSet<AccountId>,
    cycles: Vec<AccountId>,
}

impl<'a> AggregationEngine<'a> {
    /// Creates an engine for one build.
    #[must_use]
    pub fn new(
        registry: &'a AccountRegistry,
        calculator: PostingBalanceCalculator<'a>,
        lines: &'a LineIndex,
        filter: PostingFilter,
    ) -> Self {
        Self {
            registry,
            calculator,
            lines,
            filter,
            memo: HashMap::new(),
            visiting: HashSet::new(),
            cycles: Vec::new(),
        }
    }

    /// The subtree-inclusive balance of an account.
    ///
    /// Invariant: `aggregate(parent)` equals the parent's own posting
    /// balance plus the sum of `aggregate(child)` over its children,
    /// exactly.
    ///
    /// # Errors
    ///
    /// Fatal on currency conversion failure or an unknown account; the
    /// whole build must abort rather than return partial results.
    pub fn aggregate(&mut self, id: AccountId) -> Result<AggregatedBalance, BalanceError> {
        if let Some(memoized) = self.memo.get(&id) {
            return Ok(memoized.clone());
        }
        if !self.visiting.insert(id) {
            // Parent cycle: never happens on a valid tree. Yield zero for
            // the re-entered node instead of recursing forever.
            warn!(account = %id, "cycle detected in account hierarchy, zeroing subtree");
            self.cycles.push(id);
            return Ok(AggregatedBalance::zero(id));
        }

        let result = self.aggregate_inner(id);

        self.visiting.remove(&id);
        let balance = result?;
        self.memo.insert(id, balance.clone());
        Ok(balance)
    }

    fn aggregate_inner(&mut self, id: AccountId) -> Result<AggregatedBalance, BalanceError> {
        let account = self
            .registry
            .get(id)
            .ok_or(BalanceError::AccountNotFound(id))?;

        let mut result = if account.allow_posting {
            self.calculator
                .posting_balance(account, self.lines.for_account(id), &self.filter)?
        } else {
            AggregatedBalance::zero(id)
        };

        for child_id in self.registry.child_ids(id) {
            let child_balance = self.aggregate(child_id)?;
            result.accumulate(&child_balance);
        }
        Ok(result)
    }

    /// The account's own posting balance, excluding every descendant.
    ///
    /// Display rows for postable accounts sitting above a collapse depth
    /// need this: their subtree is represented by deeper rows, but their
    /// direct postings still have to appear somewhere.
    ///
    /// # Errors
    ///
    /// Same fatal conditions as [`Self::aggregate`].
    pub fn posting_only(&self, id: AccountId) -> Result<AggregatedBalance, BalanceError> {
        let account = self
            .registry
            .get(id)
            .ok_or(BalanceError::AccountNotFound(id))?;
        if account.allow_posting {
            self.calculator
                .posting_balance(account, self.lines.for_account(id), &self.filter)
        } else {
            Ok(AggregatedBalance::zero(id))
        }
    }

    /// Aggregates every root (the whole chart).
    ///
    /// # Errors
    ///
    /// Fatal on the first failed subtree; nothing partial is returned.
    pub fn aggregate_all(&mut self) -> Result<Vec<AggregatedBalance>, BalanceError> {
        let root_ids: Vec<AccountId> = self.registry.roots().map(|account| account.id).collect();
        root_ids
            .into_iter()
            .map(|id| self.aggregate(id))
            .collect()
    }

    /// Diagnostics for this build: cycles seen during traversal plus
    /// accounts the registry found unreachable from any root, and the
    /// registry orphans.
    #[must_use]
    pub fn diagnostics(&self) -> BuildDiagnostics {
        let mut cycles = self.cycles.clone();
        cycles.extend_from_slice(self.registry.unrooted());
        cycles.sort_unstable();
        cycles.dedup();
        BuildDiagnostics {
            cycles,
            orphans: self.registry.orphans().to_vec(),
        }
    }
}
