use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{CurrencyCode, FxError, PIVOT_CURRENCY};
use crate::errors::Result;

/// Immutable pivot-anchored rate table: `1 inr = rate(c)` units of `c`.
///
/// Built once at startup and shared behind an `Arc`; there is no way to
/// mutate it after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: HashMap<CurrencyCode, Decimal>,
}

impl RateTable {
    /// Builds a table from per-currency rates.
    ///
    /// Every non-pivot currency must be present with a strictly positive rate.
    /// A pivot entry, if given, must equal one; it is always stored as exactly one.
    pub fn new(rates: HashMap<CurrencyCode, Decimal>) -> std::result::Result<Self, FxError> {
        let mut validated = HashMap::with_capacity(CurrencyCode::ALL.len());
        for code in CurrencyCode::ALL {
            if code.is_pivot() {
                if let Some(rate) = rates.get(&code) {
                    if *rate != Decimal::ONE {
                        return Err(FxError::InvalidRateTable(format!(
                            "pivot currency {} must have rate 1, got {}",
                            code, rate
                        )));
                    }
                }
                validated.insert(code, Decimal::ONE);
                continue;
            }

            let rate = rates.get(&code).copied().ok_or_else(|| {
                FxError::InvalidRateTable(format!("missing rate for {}", code))
            })?;
            if rate <= Decimal::ZERO {
                return Err(FxError::InvalidRateTable(format!(
                    "rate for {} must be positive, got {}",
                    code, rate
                )));
            }
            validated.insert(code, rate);
        }
        Ok(Self { rates: validated })
    }

    /// Parses an override document of the form `{"dollars": "0.012", ...}`.
    ///
    /// Currencies missing from the document keep their built-in rate.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut rates = Self::default().rates;
        for (code, value) in raw {
            let currency = CurrencyCode::from_str(&code)?;
            let rate = match value {
                serde_json::Value::String(s) => Decimal::from_str(s.trim())?,
                serde_json::Value::Number(n) => Decimal::from_str(&n.to_string())?,
                other => {
                    return Err(FxError::InvalidRateTable(format!(
                        "rate for {} must be a number or numeric string, got {}",
                        currency, other
                    ))
                    .into())
                }
            };
            rates.insert(currency, rate);
        }
        Ok(Self::new(rates)?)
    }

    /// Units of `currency` per one unit of the pivot currency.
    pub fn rate(&self, currency: CurrencyCode) -> Decimal {
        if currency == PIVOT_CURRENCY {
            return Decimal::ONE;
        }
        // Construction guarantees an entry for every code.
        self.rates.get(&currency).copied().unwrap_or(Decimal::ONE)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        let rates = HashMap::from([
            (CurrencyCode::Inr, Decimal::ONE),
            (CurrencyCode::Dollars, dec!(0.012)),
            (CurrencyCode::Euro, dec!(0.011)),
            (CurrencyCode::Pkr, dec!(3.35)),
            (CurrencyCode::Gbp, dec!(0.0095)),
            (CurrencyCode::Cad, dec!(0.016)),
            (CurrencyCode::Aud, dec!(0.018)),
        ]);
        Self { rates }
    }
}
