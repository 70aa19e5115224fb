//! Display-depth visibility resolution.
//!
//! When a report collapses the tree at a maximum level, exactly one node
//! must represent each collapsed subtree, or totals double-count. The
//! resolver tags those representative nodes ("visible leaves").

use std::collections::{HashMap, HashSet};

use branchbook_shared::types::AccountId;

use crate::chart::AccountRegistry;

/// One row of a collapsed display.
///
/// A `Subtree` row stands for an entire collapsed subtree; an
/// `OwnPostings` row is a postable account whose subtree is represented
/// by deeper rows, so only its direct postings belong to it. Together
/// the rows partition every posting exactly once at any display depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRow {
    /// Visible leaf carrying its whole subtree.
    Subtree(AccountId),
    /// Postable ancestor of visible leaves, carrying direct postings only.
    OwnPostings(AccountId),
}

impl DisplayRow {
    /// The account this row displays.
    #[must_use]
    pub fn account_id(self) -> AccountId {
        match self {
            Self::Subtree(id) | Self::OwnPostings(id) => id,
        }
    }
}

/// Decides which accounts are visible leaves at a display depth.
///
/// An account is a visible leaf at `max_level` iff its own level is
/// within `max_level` and no descendant (at any depth) is. Summing
/// aggregated balances over visible leaves therefore counts every
/// posting exactly once; changing `max_level` repartitions the tree but
/// never changes the grand total.
///
/// Memo and cycle guard are scoped to one resolver, one build.
pub struct LevelVisibilityResolver<'a> {
    registry: &'a AccountRegistry,
    memo: HashMap<(AccountId, u32), bool>,
    visiting: HashSet<AccountId>,
}

impl<'a> LevelVisibilityResolver<'a> {
    /// Creates a resolver over the registry.
    #[must_use]
    pub fn new(registry: &'a AccountRegistry) -> Self {
        Self {
            registry,
            memo: HashMap::new(),
            visiting: HashSet::new(),
        }
    }

    /// Returns true if the account represents a collapsed subtree at
    /// `max_level`. Unknown accounts are never visible.
    pub fn is_visible_leaf(&mut self, id: AccountId, max_level: u32) -> bool {
        let Some(account) = self.registry.get(id) else {
            return false;
        };
        account.level <= max_level && !self.has_visible_descendant(id, max_level)
    }

    /// All visible leaves at `max_level`, in depth-first display order
    /// (siblings by code).
    pub fn visible_leaves(&mut self, max_level: u32) -> Vec<AccountId> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<AccountId> = {
            let mut roots: Vec<AccountId> = self.registry.roots().map(|a| a.id).collect();
            roots.reverse();
            roots
        };
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                // Cyclic hierarchy; each node is considered once.
                continue;
            }
            if self.is_visible_leaf(id, max_level) {
                result.push(id);
                continue;
            }
            let mut children = self.registry.child_ids(id);
            children.reverse();
            stack.extend(children);
        }
        result
    }

    /// All display rows at `max_level`, in depth-first display order.
    ///
    /// Every visible leaf becomes a [`DisplayRow::Subtree`] row. A
    /// postable account that is passed over on the way down (it has
    /// visible descendants, so it is not a leaf itself) becomes a
    /// [`DisplayRow::OwnPostings`] row; without it, postings made
    /// directly against such an account would vanish from the report.
    pub fn display_rows(&mut self, max_level: u32) -> Vec<DisplayRow> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<AccountId> = {
            let mut roots: Vec<AccountId> = self.registry.roots().map(|a| a.id).collect();
            roots.reverse();
            roots
        };
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if self.is_visible_leaf(id, max_level) {
                result.push(DisplayRow::Subtree(id));
                continue;
            }
            if self.registry.get(id).is_some_and(|a| a.allow_posting) {
                result.push(DisplayRow::OwnPostings(id));
            }
            let mut children = self.registry.child_ids(id);
            children.reverse();
            stack.extend(children);
        }
        result
    }

    /// Whether any descendant of `id`, at any depth, has a level within
    /// `max_level`.
    fn has_visible_descendant(&mut self, id: AccountId, max_level: u32) -> bool {
        if let Some(&memoized) = self.memo.get(&(id, max_level)) {
            return memoized;
        }
        if !self.visiting.insert(id) {
            // Cycle guard: treat the re-entered subtree as exhausted.
            return false;
        }

        let mut found = false;
        for child_id in self.registry.child_ids(id) {
            let child_in_depth = self
                .registry
                .get(child_id)
                .is_some_and(|child| child.level <= max_level);
            if child_in_depth || self.has_visible_descendant(child_id, max_level) {
                found = true;
                break;
            }
        }

        self.visiting.remove(&id);
        self.memo.insert((id, max_level), found);
        found
    }
}
