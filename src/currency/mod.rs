//! Currency conversion against an injectable rate table

mod convert;
mod rates;

pub use convert::{convert, convert_amount, rate, CurrencyAmount};
pub use rates::{RateTable, DEFAULT_REFERENCE_CURRENCY};
