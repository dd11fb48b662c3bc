use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};

use super::{CurrencyCode, CurrencyInfo, FxError, Money, RateTable};
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Cross-rate converter over a fixed pivot rate table.
///
/// Every pair is converted through the pivot currency, so only one rate per
/// currency is needed. The converter holds no mutable state and is cheap to
/// clone; clones share the same table.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    rates: Arc<RateTable>,
}

impl CurrencyConverter {
    pub fn new(rates: Arc<RateTable>) -> Self {
        Self { rates }
    }

    /// Converts `amount` from one currency to another.
    ///
    /// Same-currency conversions return the amount untouched. Otherwise the
    /// amount is divided into the pivot and multiplied out into the target,
    /// skipping either step when that side is the pivot itself. No rounding
    /// is applied; callers round only for display. Results that do not fit
    /// in a `Decimal` fail with `FxError::AmountOutOfRange`.
    pub fn convert(
        &self,
        amount: Decimal,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<Decimal, FxError> {
        if from == to {
            return Ok(amount);
        }

        let in_pivot = if from.is_pivot() {
            amount
        } else {
            amount
                .checked_div(self.rates.rate(from))
                .ok_or_else(|| out_of_range(amount, from, to))?
        };

        if to.is_pivot() {
            Ok(in_pivot)
        } else {
            in_pivot
                .checked_mul(self.rates.rate(to))
                .ok_or_else(|| out_of_range(amount, from, to))
        }
    }

    pub fn convert_money(&self, money: &Money, to: CurrencyCode) -> Result<Money, FxError> {
        Ok(Money::new(
            self.convert(money.amount, money.currency, to)?,
            to,
        ))
    }

    /// Sums amounts held in mixed currencies, expressed in `to`.
    pub fn sum(&self, amounts: &[Money], to: CurrencyCode) -> Result<Decimal, FxError> {
        amounts.iter().try_fold(Decimal::ZERO, |total, m| {
            let converted = self.convert(m.amount, m.currency, to)?;
            total.checked_add(converted).ok_or_else(|| {
                FxError::AmountOutOfRange(format!("sum in {} exceeds the supported range", to))
            })
        })
    }

    /// Renders `amount` as whole units prefixed by the currency symbol, with
    /// digits grouped by three (`₹123,456`). Midpoints round away from zero.
    pub fn format(&self, amount: Decimal, currency: CurrencyCode) -> String {
        let rounded = amount.round_dp_with_strategy(
            DISPLAY_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        );
        let digits = rounded.abs().trunc().to_string();
        let grouped = group_thousands(&digits);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{}", currency.symbol(), grouped)
        } else {
            format!("{}{}", currency.symbol(), grouped)
        }
    }

    pub fn rate_of(&self, currency: CurrencyCode) -> Decimal {
        self.rates.rate(currency)
    }

    /// Lists every supported currency with its symbol, name and pivot rate.
    pub fn currencies(&self) -> Vec<CurrencyInfo> {
        CurrencyCode::ALL
            .into_iter()
            .map(|code| CurrencyInfo {
                code,
                symbol: code.symbol().to_string(),
                display_name: code.display_name().to_string(),
                rate: self.rates.rate(code),
            })
            .collect()
    }
}

fn out_of_range(amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> FxError {
    FxError::AmountOutOfRange(format!("{} {} cannot be expressed in {}", amount, from, to))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn converter() -> CurrencyConverter {
        CurrencyConverter::new(Arc::new(RateTable::default()))
    }

    #[test]
    fn test_same_currency_is_identity() {
        let c = converter();
        let amount = dec!(123.456789);
        for code in CurrencyCode::ALL {
            let converted = c.convert(amount, code, code).unwrap();
            assert_eq!(converted, amount);
            assert_eq!(converted.scale(), amount.scale());
        }
    }

    #[test]
    fn test_pivot_to_target_multiplies_exactly() {
        let c = converter();
        assert_eq!(
            c.convert(dec!(1000), CurrencyCode::Inr, CurrencyCode::Dollars).unwrap(),
            dec!(12)
        );
        assert_eq!(
            c.convert(dec!(100), CurrencyCode::Inr, CurrencyCode::Pkr).unwrap(),
            dec!(335)
        );
    }

    #[test]
    fn test_source_to_pivot_divides_exactly() {
        let c = converter();
        assert_eq!(
            c.convert(dec!(12), CurrencyCode::Dollars, CurrencyCode::Inr).unwrap(),
            dec!(1000)
        );
    }

    #[test]
    fn test_cross_rate_goes_through_pivot() {
        let c = converter();
        // 24 dollars = 2000 inr = 22 euro
        assert_eq!(
            c.convert(dec!(24), CurrencyCode::Dollars, CurrencyCode::Euro).unwrap(),
            dec!(22)
        );
    }

    #[test]
    fn test_sum_mixed_currencies() {
        let c = converter();
        let amounts = vec![
            Money::new(dec!(1000), CurrencyCode::Inr),
            Money::new(dec!(3), CurrencyCode::Dollars),
            Money::new(dec!(1.1), CurrencyCode::Euro),
        ];
        // 12 + 3 + 1.2 dollars
        assert_eq!(c.sum(&amounts, CurrencyCode::Dollars).unwrap(), dec!(16.2));
        assert_eq!(c.sum(&[], CurrencyCode::Gbp).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_convert_money_tags_target_currency() {
        let c = converter();
        let converted = c
            .convert_money(&Money::new(dec!(500), CurrencyCode::Inr), CurrencyCode::Cad)
            .unwrap();
        assert_eq!(converted, Money::new(dec!(8), CurrencyCode::Cad));
    }

    #[test]
    fn test_amounts_beyond_decimal_range_are_rejected() {
        let c = converter();
        let huge = Decimal::from_str("70000000000000000000000000000").unwrap();
        assert!(matches!(
            c.convert(huge, CurrencyCode::Inr, CurrencyCode::Pkr),
            Err(FxError::AmountOutOfRange(_))
        ));
        // Dividing into the pivot grows the amount too.
        assert!(matches!(
            c.convert(huge, CurrencyCode::Gbp, CurrencyCode::Inr),
            Err(FxError::AmountOutOfRange(_))
        ));
        // Same-currency conversion never touches the arithmetic.
        assert_eq!(c.convert(huge, CurrencyCode::Pkr, CurrencyCode::Pkr).unwrap(), huge);

        let amounts = vec![
            Money::new(Decimal::MAX, CurrencyCode::Inr),
            Money::new(Decimal::MAX, CurrencyCode::Inr),
        ];
        assert!(matches!(
            c.sum(&amounts, CurrencyCode::Inr),
            Err(FxError::AmountOutOfRange(_))
        ));
    }

    #[test]
    fn test_format_rounds_to_whole_units_with_grouping() {
        let c = converter();
        assert_eq!(c.format(dec!(0), CurrencyCode::Dollars), "$0");
        assert_eq!(c.format(dec!(999.4), CurrencyCode::Dollars), "$999");
        assert_eq!(c.format(dec!(999.5), CurrencyCode::Dollars), "$1,000");
        assert_eq!(c.format(dec!(1234567.89), CurrencyCode::Inr), "₹1,234,568");
        assert_eq!(c.format(dec!(100000), CurrencyCode::Gbp), "£100,000");
        assert_eq!(c.format(dec!(12.5), CurrencyCode::Aud), "A$13");
    }

    #[test]
    fn test_format_negative_amounts() {
        let c = converter();
        assert_eq!(c.format(dec!(-1500.2), CurrencyCode::Euro), "-€1,500");
        assert_eq!(c.format(dec!(-0.2), CurrencyCode::Euro), "€0");
    }

    #[test]
    fn test_currencies_lists_all_codes_in_order() {
        let c = converter();
        let infos = c.currencies();
        assert_eq!(infos.len(), 7);
        assert_eq!(infos[0].code, CurrencyCode::Inr);
        assert_eq!(infos[0].rate, Decimal::ONE);
        assert_eq!(infos[1].symbol, "$");
        assert_eq!(infos[1].display_name, "US Dollar");
        assert_eq!(c.rate_of(CurrencyCode::Gbp), dec!(0.0095));
    }
}
