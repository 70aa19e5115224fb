//! In-memory index of the chart of accounts tree.
//!
//! The registry owns a flat arena of accounts plus integer-index lookup
//! maps, built once per report build. Parent pointers are resolved into a
//! parent->children index so aggregation can walk the tree without chasing
//! object references.

use std::collections::HashMap;

use branchbook_shared::types::AccountId;
use tracing::warn;

use super::types::Account;

/// Index of the chart of accounts for one report build.
///
/// Accounts whose declared parent does not exist in the set are adopted as
/// roots rather than rejected; partially-loaded hierarchies still produce
/// a usable (if flatter) tree. Adopted orphans are recorded for build
/// diagnostics.
#[derive(Debug)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
    by_id: HashMap<AccountId, usize>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    orphans: Vec<AccountId>,
    unrooted: Vec<AccountId>,
}

impl AccountRegistry {
    /// Builds the registry from a flat account list.
    #[must_use]
    pub fn new(accounts: Vec<Account>) -> Self {
        let by_id: HashMap<AccountId, usize> = accounts
            .iter()
            .enumerate()
            .map(|(idx, account)| (account.id, idx))
            .collect();

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); accounts.len()];
        let mut roots = Vec::new();
        let mut orphans = Vec::new();

        for (idx, account) in accounts.iter().enumerate() {
            match account.parent_id {
                Some(parent_id) => match by_id.get(&parent_id) {
                    Some(&parent_idx) => children[parent_idx].push(idx),
                    None => {
                        warn!(
                            account = %account.id,
                            code = %account.code,
                            parent = %parent_id,
                            "account references a missing parent, adopting as root"
                        );
                        orphans.push(account.id);
                        roots.push(idx);
                    }
                },
                None => roots.push(idx),
            }
        }

        // Deterministic sibling order by account code.
        let sort_by_code = |indices: &mut Vec<usize>, accounts: &[Account]| {
            indices.sort_by(|&a, &b| accounts[a].code.cmp(&accounts[b].code));
        };
        for child_list in &mut children {
            sort_by_code(child_list, &accounts);
        }
        sort_by_code(&mut roots, &accounts);

        // A parent chain that loops back on itself makes every member
        // resolvable yet reachable from no root; such accounts would
        // silently vanish from every traversal, so they are recorded.
        let mut reachable = vec![false; accounts.len()];
        let mut stack: Vec<usize> = roots.clone();
        while let Some(idx) = stack.pop() {
            if reachable[idx] {
                continue;
            }
            reachable[idx] = true;
            stack.extend(&children[idx]);
        }
        let unrooted: Vec<AccountId> = accounts
            .iter()
            .enumerate()
            .filter(|&(idx, _)| !reachable[idx])
            .map(|(_, account)| {
                warn!(
                    account = %account.id,
                    code = %account.code,
                    "account unreachable from any root, cyclic parent chain"
                );
                account.id
            })
            .collect();

        Self {
            accounts,
            by_id,
            children,
            roots,
            orphans,
            unrooted,
        }
    }

    /// Looks up an account by ID.
    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.by_id.get(&id).map(|&idx| &self.accounts[idx])
    }

    /// Direct children of an account, sorted by code.
    pub fn children(&self, id: AccountId) -> impl Iterator<Item = &Account> {
        self.by_id
            .get(&id)
            .map(|&idx| self.children[idx].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&child_idx| &self.accounts[child_idx])
    }

    /// IDs of the direct children of an account, sorted by code.
    #[must_use]
    pub fn child_ids(&self, id: AccountId) -> Vec<AccountId> {
        self.children(id).map(|child| child.id).collect()
    }

    /// Root accounts, sorted by code.
    pub fn roots(&self) -> impl Iterator<Item = &Account> {
        self.roots.iter().map(|&idx| &self.accounts[idx])
    }

    /// All accounts in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// All account IDs in arena order.
    #[must_use]
    pub fn ids(&self) -> Vec<AccountId> {
        self.accounts.iter().map(|account| account.id).collect()
    }

    /// Number of accounts in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the registry holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts that were adopted as roots because their parent was missing.
    #[must_use]
    pub fn orphans(&self) -> &[AccountId] {
        &self.orphans
    }

    /// Accounts unreachable from any root (members of a cyclic parent
    /// chain with no path to a root, and their descendants).
    #[must_use]
    pub fn unrooted(&self) -> &[AccountId] {
        &self.unrooted
    }
}
