//! The closed set of supported currencies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FxError;

/// Currency every rate in the table is quoted against.
pub const PIVOT_CURRENCY: CurrencyCode = CurrencyCode::Inr;

/// Supported currency codes. The wire form is the lowercase variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyCode {
    Inr,
    Dollars,
    Euro,
    Pkr,
    Gbp,
    Cad,
    Aud,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 7] = [
        CurrencyCode::Inr,
        CurrencyCode::Dollars,
        CurrencyCode::Euro,
        CurrencyCode::Pkr,
        CurrencyCode::Gbp,
        CurrencyCode::Cad,
        CurrencyCode::Aud,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Inr => "inr",
            CurrencyCode::Dollars => "dollars",
            CurrencyCode::Euro => "euro",
            CurrencyCode::Pkr => "pkr",
            CurrencyCode::Gbp => "gbp",
            CurrencyCode::Cad => "cad",
            CurrencyCode::Aud => "aud",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Inr => "₹",
            CurrencyCode::Dollars => "$",
            CurrencyCode::Euro => "€",
            CurrencyCode::Pkr => "₨",
            CurrencyCode::Gbp => "£",
            CurrencyCode::Cad => "C$",
            CurrencyCode::Aud => "A$",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CurrencyCode::Inr => "Indian Rupee",
            CurrencyCode::Dollars => "US Dollar",
            CurrencyCode::Euro => "Euro",
            CurrencyCode::Pkr => "Pakistani Rupee",
            CurrencyCode::Gbp => "British Pound",
            CurrencyCode::Cad => "Canadian Dollar",
            CurrencyCode::Aud => "Australian Dollar",
        }
    }

    pub fn is_pivot(&self) -> bool {
        *self == PIVOT_CURRENCY
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        CurrencyCode::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| FxError::UnknownCurrency(s.to_string()))
    }
}

/// Display symbol for a raw currency code.
pub fn symbol_of(code: &str) -> Result<&'static str, FxError> {
    code.parse::<CurrencyCode>().map(|c| c.symbol())
}

/// Human readable name for a raw currency code.
pub fn display_name_of(code: &str) -> Result<&'static str, FxError> {
    code.parse::<CurrencyCode>().map(|c| c.display_name())
}
