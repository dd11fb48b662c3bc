//! FX (Foreign Exchange) module - currencies, the pivot rate table and conversion.

pub mod currency;
pub mod currency_converter;
mod fx_errors;
mod fx_model;
mod rate_table;

pub use currency::{display_name_of, symbol_of, CurrencyCode, PIVOT_CURRENCY};
pub use currency_converter::CurrencyConverter;
pub use fx_errors::FxError;
pub use fx_model::{CurrencyInfo, Money};
pub use rate_table::RateTable;
