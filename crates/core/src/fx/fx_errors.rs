use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Invalid rate table: {0}")]
    InvalidRateTable(String),

    /// The result does not fit in a `Decimal`.
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),
}
