//! Property-based tests for the aggregation engine.
//!
//! - Aggregation identity: parent = own posting + sum of children
//! - Level invariance: display-row grand totals do not depend on depth
//! - Split rule: sign/side invariants of the debit/credit split

use proptest::prelude::*;
use rust_decimal::Decimal;

use branchbook_shared::types::AccountId;
use chrono::NaiveDate;

use crate::chart::{Account, AccountNature, AccountRegistry, AccountType};
use crate::currency::{CurrencyConverter, RateTable};

use super::engine::AggregationEngine;
use super::posting::PostingBalanceCalculator;
use super::split::split_by_nature;
use super::types::{AggregatedBalance, LineIndex, PostingFilter};

fn rate_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
}

/// A randomly shaped chart of accounts.
///
/// `parents[i]` picks the parent of account `i + 1` among accounts
/// `0..=i`, so the parent graph is acyclic by construction. Levels are
/// derived, keeping the level-consistency invariant.
#[derive(Debug)]
struct ChartShape {
    parents: Vec<prop::sample::Index>,
    openings_cents: Vec<i64>,
    debit_natured: Vec<bool>,
    postable: Vec<bool>,
}

fn chart_shape(max_accounts: usize) -> impl Strategy<Value = ChartShape> {
    (2..max_accounts).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<prop::sample::Index>(), n - 1),
            prop::collection::vec(-1_000_000i64..1_000_000, n),
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(any::<bool>(), n),
        )
            .prop_map(
                |(parents, openings_cents, debit_natured, postable)| ChartShape {
                    parents,
                    openings_cents,
                    debit_natured,
                    postable,
                },
            )
    })
}

fn build_accounts(shape: &ChartShape) -> Vec<Account> {
    let n = shape.openings_cents.len();
    let mut accounts: Vec<Account> = Vec::with_capacity(n);
    for i in 0..n {
        let (parent_id, level) = if i == 0 {
            (None, 1)
        } else {
            let parent_idx = shape.parents[i - 1].index(i);
            let parent: &Account = &accounts[parent_idx];
            (Some(parent.id), parent.level + 1)
        };
        let nature = if shape.debit_natured[i] {
            AccountNature::Debit
        } else {
            AccountNature::Credit
        };
        accounts.push(Account {
            id: AccountId::new(),
            code: format!("{:04}", i + 1),
            name: format!("Account {i}"),
            parent_id,
            level,
            account_type: match nature {
                AccountNature::Debit => AccountType::Assets,
                AccountNature::Credit => AccountType::Liabilities,
            },
            nature,
            currency: "USD".to_string(),
            opening_balance: Decimal::new(shape.openings_cents[i], 2),
            cached_balance: Decimal::ZERO,
            allow_posting: shape.postable[i],
            is_active: true,
            branch_id: None,
        });
    }
    accounts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For every account in an arbitrary valid tree, the aggregated
    /// balance equals the account's own posting balance plus the sum of
    /// its children's aggregated balances, exactly.
    #[test]
    fn prop_aggregation_identity(shape in chart_shape(25)) {
        let accounts = build_accounts(&shape);
        let ids: Vec<AccountId> = accounts.iter().map(|a| a.id).collect();
        let registry = AccountRegistry::new(accounts);
        let lines = LineIndex::default();

        let table = RateTable::new();
        let converter = CurrencyConverter::new(&table);
        let filter = PostingFilter::posted_full_history();
        let calculator =
            PostingBalanceCalculator::new(&converter, "USD", "USD", rate_date());
        let mut engine = AggregationEngine::new(
            &registry,
            PostingBalanceCalculator::new(&converter, "USD", "USD", rate_date()),
            &lines,
            filter,
        );

        for id in ids {
            let aggregated = engine.aggregate(id).unwrap();

            let account = registry.get(id).unwrap();
            let mut expected = calculator
                .posting_balance(account, lines.for_account(id), &filter)
                .unwrap();
            for child_id in registry.child_ids(id) {
                let child = engine.aggregate(child_id).unwrap();
                expected.accumulate(&child);
            }

            prop_assert_eq!(aggregated, expected);
        }
    }

    /// The grand total over display rows is identical for every display
    /// depth; collapsing only repartitions the tree. Postable accounts
    /// that sit above the collapse depth are covered by own-postings
    /// rows, so nothing is dropped.
    #[test]
    fn prop_level_invariance_of_totals(shape in chart_shape(25)) {
        let accounts = build_accounts(&shape);
        let registry = AccountRegistry::new(accounts);
        let lines = LineIndex::default();

        let table = RateTable::new();
        let converter = CurrencyConverter::new(&table);
        let mut engine = AggregationEngine::new(
            &registry,
            PostingBalanceCalculator::new(&converter, "USD", "USD", rate_date()),
            &lines,
            PostingFilter::posted_full_history(),
        );
        let mut resolver = super::visibility::LevelVisibilityResolver::new(&registry);

        let mut totals_per_level: Vec<(Decimal, Decimal)> = Vec::new();
        for max_level in 1..=6u32 {
            let mut total = AggregatedBalance::zero(AccountId::new());
            for row in resolver.display_rows(max_level) {
                let balance = match row {
                    super::visibility::DisplayRow::Subtree(id) => engine.aggregate(id).unwrap(),
                    super::visibility::DisplayRow::OwnPostings(id) => {
                        engine.posting_only(id).unwrap()
                    }
                };
                total.accumulate(&balance);
            }
            totals_per_level.push((total.debit_selected, total.credit_selected));
        }

        for window in totals_per_level.windows(2) {
            prop_assert_eq!(window[0], window[1]);
        }
    }

    /// Split invariants: both sides non-negative, at most one side
    /// nonzero, and the signed net reconstructs the input balance.
    #[test]
    fn prop_split_reconstructs_balance(
        cents in -10_000_000i64..10_000_000,
        debit_natured in any::<bool>(),
    ) {
        let balance = Decimal::new(cents, 2);
        let nature = if debit_natured {
            AccountNature::Debit
        } else {
            AccountNature::Credit
        };
        let (debit, credit) = split_by_nature(balance, nature);

        prop_assert!(debit >= Decimal::ZERO);
        prop_assert!(credit >= Decimal::ZERO);
        prop_assert!(debit.is_zero() || credit.is_zero());

        let reconstructed = nature.signed_movement(debit, credit);
        prop_assert_eq!(reconstructed, balance);
    }
}
