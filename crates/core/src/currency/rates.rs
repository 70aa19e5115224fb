//! Exchange rate lookup and the conversion boundary.
//!
//! The engine never sees raw rates: it asks a [`CurrencyConverter`] for a
//! converted amount and the converter either succeeds or fails loudly.
//! Substituting a sentinel rate (zero, 1.0) would silently corrupt every
//! balance above the affected account.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::convert::convert_amount;
use super::error::CurrencyError;

/// Exchange rate between two currencies, effective from a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: String,
    /// Target currency code.
    pub to_currency: String,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
    /// Date this rate is effective.
    pub effective_date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(
        from_currency: String,
        to_currency: String,
        rate: Decimal,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            from_currency,
            to_currency,
            rate,
            effective_date,
        }
    }

    /// Returns the inverse rate, or `None` when the rate is not
    /// positive and therefore cannot be inverted.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        if self.rate <= Decimal::ZERO {
            return None;
        }
        Some(Self {
            from_currency: self.to_currency.clone(),
            to_currency: self.from_currency.clone(),
            rate: Decimal::ONE / self.rate,
            effective_date: self.effective_date,
        })
    }
}

/// Point-in-time exchange rate lookup.
pub trait RateLookup {
    /// The rate for converting `from` into `to` effective on `date`,
    /// or `None` when the pair is unavailable.
    fn rate(&self, from: &str, to: &str, date: NaiveDate) -> Option<Decimal>;
}

/// Converts amounts between currencies at a point-in-time rate.
///
/// Wraps a [`RateLookup`] and turns missing pairs into a fatal
/// [`CurrencyError::UnknownRate`].
pub struct CurrencyConverter<'a> {
    lookup: &'a dyn RateLookup,
}

impl<'a> CurrencyConverter<'a> {
    /// Creates a converter over the given rate lookup.
    #[must_use]
    pub fn new(lookup: &'a dyn RateLookup) -> Self {
        Self { lookup }
    }

    /// Converts `amount` from one currency to another at the rate
    /// effective on `date`.
    ///
    /// Same-currency conversion is the identity and never consults the
    /// lookup.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRate` when no rate exists for the pair, and
    /// `InvalidRate` when the stored rate is not positive.
    pub fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        date: NaiveDate,
    ) -> Result<Decimal, CurrencyError> {
        if from == to {
            return Ok(amount);
        }
        let rate = self
            .lookup
            .rate(from, to, date)
            .ok_or_else(|| CurrencyError::UnknownRate {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidRate(rate));
        }
        Ok(convert_amount(amount, rate))
    }
}

/// In-memory rate table.
///
/// Stores dated rates per currency pair; lookup picks the most recent
/// rate effective on or before the requested date. Inserting a rate also
/// derives the inverse pair.
#[derive(Debug, Default)]
pub struct RateTable {
    rates: HashMap<(String, String), Vec<ExchangeRate>>,
}

impl RateTable {
    /// Creates an empty rate table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rate and its derived inverse.
    ///
    /// # Errors
    ///
    /// Rejects non-positive rates with [`CurrencyError::InvalidRate`];
    /// nothing is stored on failure.
    pub fn insert(&mut self, rate: ExchangeRate) -> Result<(), CurrencyError> {
        let Some(inverse) = rate.inverse() else {
            return Err(CurrencyError::InvalidRate(rate.rate));
        };
        self.push(rate);
        self.push(inverse);
        Ok(())
    }

    fn push(&mut self, rate: ExchangeRate) {
        let key = (rate.from_currency.clone(), rate.to_currency.clone());
        let entry = self.rates.entry(key).or_default();
        entry.push(rate);
        entry.sort_by_key(|r| r.effective_date);
    }
}

impl RateLookup for RateTable {
    fn rate(&self, from: &str, to: &str, date: NaiveDate) -> Option<Decimal> {
        self.rates
            .get(&(from.to_string(), to.to_string()))?
            .iter()
            .rev()
            .find(|rate| rate.effective_date <= date)
            .map(|rate| rate.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table_with_eur_usd() -> RateTable {
        let mut table = RateTable::new();
        table
            .insert(ExchangeRate::new(
                "EUR".to_string(),
                "USD".to_string(),
                dec!(1.25),
                date(2026, 1, 1),
            ))
            .unwrap();
        table
    }

    #[test]
    fn test_convert_known_pair() {
        let table = table_with_eur_usd();
        let converter = CurrencyConverter::new(&table);
        let result = converter
            .convert(dec!(100), "EUR", "USD", date(2026, 2, 1))
            .unwrap();
        assert_eq!(result, dec!(125.0000));
    }

    #[test]
    fn test_convert_uses_derived_inverse() {
        let table = table_with_eur_usd();
        let converter = CurrencyConverter::new(&table);
        let result = converter
            .convert(dec!(125), "USD", "EUR", date(2026, 2, 1))
            .unwrap();
        assert_eq!(result, dec!(100.0000));
    }

    #[test]
    fn test_unknown_pair_fails_explicitly() {
        let table = table_with_eur_usd();
        let converter = CurrencyConverter::new(&table);
        let err = converter
            .convert(dec!(100), "GBP", "USD", date(2026, 2, 1))
            .unwrap_err();
        assert!(matches!(err, CurrencyError::UnknownRate { .. }));
    }

    #[test]
    fn test_rate_not_yet_effective_is_unavailable() {
        let table = table_with_eur_usd();
        let converter = CurrencyConverter::new(&table);
        let err = converter
            .convert(dec!(100), "EUR", "USD", date(2025, 12, 31))
            .unwrap_err();
        assert!(matches!(err, CurrencyError::UnknownRate { .. }));
    }

    #[test]
    fn test_most_recent_effective_rate_wins() {
        let mut table = table_with_eur_usd();
        table
            .insert(ExchangeRate::new(
                "EUR".to_string(),
                "USD".to_string(),
                dec!(1.30),
                date(2026, 3, 1),
            ))
            .unwrap();
        let converter = CurrencyConverter::new(&table);

        let early = converter
            .convert(dec!(100), "EUR", "USD", date(2026, 2, 1))
            .unwrap();
        let late = converter
            .convert(dec!(100), "EUR", "USD", date(2026, 3, 15))
            .unwrap();
        assert_eq!(early, dec!(125.0000));
        assert_eq!(late, dec!(130.0000));
    }

    #[test]
    fn test_insert_rejects_non_positive_rates() {
        let mut table = RateTable::new();

        let zero = table.insert(ExchangeRate::new(
            "EUR".to_string(),
            "USD".to_string(),
            Decimal::ZERO,
            date(2026, 1, 1),
        ));
        assert!(matches!(zero, Err(CurrencyError::InvalidRate(_))));

        let negative = table.insert(ExchangeRate::new(
            "EUR".to_string(),
            "USD".to_string(),
            dec!(-1.25),
            date(2026, 1, 1),
        ));
        assert!(matches!(negative, Err(CurrencyError::InvalidRate(_))));

        // Nothing was stored for the pair in either direction.
        assert!(table.rate("EUR", "USD", date(2026, 2, 1)).is_none());
        assert!(table.rate("USD", "EUR", date(2026, 2, 1)).is_none());
    }

    #[test]
    fn test_same_currency_is_identity() {
        let table = RateTable::new();
        let converter = CurrencyConverter::new(&table);
        let result = converter
            .convert(dec!(100.50), "USD", "USD", date(2026, 2, 1))
            .unwrap();
        assert_eq!(result, dec!(100.50));
    }
}
