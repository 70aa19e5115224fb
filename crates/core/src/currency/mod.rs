//! Multi-currency handling and exchange rates.

pub mod convert;
pub mod error;
pub mod rates;
pub mod types;

pub use convert::{convert_amount, convert_amount_with_precision};
pub use error::CurrencyError;
pub use rates::{CurrencyConverter, ExchangeRate, RateLookup, RateTable};
pub use types::{Currency, base_currency};
