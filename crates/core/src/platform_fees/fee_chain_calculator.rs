use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FeeProfile, LegName};
use crate::fx::{CurrencyCode, CurrencyConverter, FxError, Money};

/// Non-fatal conditions worth surfacing alongside a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeCaution {
    /// Fees consume the whole withdrawal or more.
    NetNotPositive,
}

/// Cost of a withdrawal, every figure expressed in `currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeBreakdown {
    pub currency: CurrencyCode,
    pub gross: Decimal,
    pub percentage_fee: Decimal,
    /// Flat fee per present leg; absent legs are omitted.
    pub fees_by_leg: BTreeMap<LegName, Decimal>,
    pub total_fees: Decimal,
    pub net: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caution: Option<FeeCaution>,
}

/// Computes what a withdrawal costs once a platform's fees are applied.
#[derive(Debug, Clone)]
pub struct FeeChainCalculator {
    converter: CurrencyConverter,
}

impl FeeChainCalculator {
    pub fn new(converter: CurrencyConverter) -> Self {
        Self { converter }
    }

    /// Applies the profile's percentage fee and every present flat leg to `gross_amount`.
    ///
    /// A net at or below zero is reported through `caution`, not rejected.
    /// Figures that leave the `Decimal` range fail with `FxError::AmountOutOfRange`.
    pub fn compute_total_cost(
        &self,
        profile: &FeeProfile,
        gross_amount: &Money,
        target_currency: CurrencyCode,
    ) -> Result<FeeBreakdown, FxError> {
        let gross =
            self.converter
                .convert(gross_amount.amount, gross_amount.currency, target_currency)?;
        let percentage_fee = gross
            .checked_mul(profile.platform_fee_percentage)
            .and_then(|fee| fee.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(|| out_of_range("percentage fee"))?;

        let fees_by_leg = profile
            .legs
            .iter()
            .map(|(name, leg)| {
                self.converter
                    .convert(leg.amount, leg.currency, target_currency)
                    .map(|fee| (name, fee))
            })
            .collect::<Result<BTreeMap<LegName, Decimal>, FxError>>()?;

        let total_fees = fees_by_leg
            .values()
            .try_fold(percentage_fee, |total, fee| total.checked_add(*fee))
            .ok_or_else(|| out_of_range("total fees"))?;
        let net = gross
            .checked_sub(total_fees)
            .ok_or_else(|| out_of_range("net amount"))?;
        let caution = (net <= Decimal::ZERO).then_some(FeeCaution::NetNotPositive);

        Ok(FeeBreakdown {
            currency: target_currency,
            gross,
            percentage_fee,
            fees_by_leg,
            total_fees,
            net,
            caution,
        })
    }
}

fn out_of_range(figure: &str) -> FxError {
    FxError::AmountOutOfRange(format!("{} exceeds the supported range", figure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::RateTable;
    use crate::platform_fees::{well_known_platforms, FeeLeg, NewFeeProfile, OwnerScope};
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn calculator() -> FeeChainCalculator {
        FeeChainCalculator::new(CurrencyConverter::new(Arc::new(RateTable::default())))
    }

    fn profile_from(new_profile: NewFeeProfile) -> FeeProfile {
        FeeProfile {
            id: format!("system-{}", new_profile.platform_name),
            platform_name: new_profile.platform_name,
            platform_fee_percentage: new_profile.platform_fee_percentage,
            legs: new_profile.legs,
            is_custom: false,
            owner_scope: OwnerScope::System,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn well_known(name: &str) -> FeeProfile {
        let entry = well_known_platforms()
            .into_iter()
            .find(|p| p.platform_name == name)
            .unwrap();
        profile_from(entry)
    }

    #[test]
    fn test_fiverr_chain_in_dollars() {
        let breakdown = calculator()
            .compute_total_cost(
                &well_known("Fiverr"),
                &Money::new(dec!(100), CurrencyCode::Dollars),
                CurrencyCode::Dollars,
            )
            .unwrap();

        assert_eq!(breakdown.gross, dec!(100));
        assert_eq!(breakdown.percentage_fee, dec!(20));
        assert_eq!(breakdown.fees_by_leg.len(), 2);
        assert_eq!(
            breakdown.fees_by_leg[&LegName::PlatformToPayoneer],
            dec!(3)
        );
        assert_eq!(
            breakdown.fees_by_leg[&LegName::PayoneerToLocalBank],
            dec!(1)
        );
        assert!(!breakdown
            .fees_by_leg
            .contains_key(&LegName::PlatformToLocalBank));
        assert_eq!(breakdown.total_fees, dec!(24));
        assert_eq!(breakdown.net, dec!(76));
        assert_eq!(breakdown.caution, None);
    }

    #[test]
    fn test_cross_currency_gross_with_no_fees() {
        let breakdown = calculator()
            .compute_total_cost(
                &well_known("Toptal"),
                &Money::new(dec!(1000), CurrencyCode::Inr),
                CurrencyCode::Dollars,
            )
            .unwrap();

        assert_eq!(breakdown.gross, dec!(12));
        assert_eq!(breakdown.total_fees, Decimal::ZERO);
        assert_eq!(breakdown.net, dec!(12));
        assert!(breakdown.fees_by_leg.is_empty());
    }

    #[test]
    fn test_leg_fees_are_converted_into_target_currency() {
        // Upwork: 10% + 0.99 dollars, computed in inr.
        let breakdown = calculator()
            .compute_total_cost(
                &well_known("Upwork"),
                &Money::new(dec!(10000), CurrencyCode::Inr),
                CurrencyCode::Inr,
            )
            .unwrap();

        assert_eq!(breakdown.percentage_fee, dec!(1000));
        assert_eq!(
            breakdown.fees_by_leg[&LegName::PlatformToLocalBank],
            dec!(82.5)
        );
        assert_eq!(breakdown.total_fees, dec!(1082.5));
        assert_eq!(breakdown.net, dec!(8917.5));
    }

    #[test]
    fn test_net_below_zero_is_reported_not_rejected() {
        let profile = profile_from(
            NewFeeProfile::new("Tiny", dec!(50)).with_leg(
                LegName::PlatformToLocalBank,
                FeeLeg::new(dec!(5), CurrencyCode::Dollars),
            ),
        );
        let breakdown = calculator()
            .compute_total_cost(
                &profile,
                &Money::new(dec!(4), CurrencyCode::Dollars),
                CurrencyCode::Dollars,
            )
            .unwrap();

        assert_eq!(breakdown.total_fees, dec!(7));
        assert_eq!(breakdown.net, dec!(-3));
        assert_eq!(breakdown.caution, Some(FeeCaution::NetNotPositive));
    }

    #[test]
    fn test_zero_net_is_flagged() {
        let profile = profile_from(NewFeeProfile::new("All of it", dec!(100)));
        let breakdown = calculator()
            .compute_total_cost(
                &profile,
                &Money::new(dec!(250), CurrencyCode::Euro),
                CurrencyCode::Euro,
            )
            .unwrap();
        assert_eq!(breakdown.net, Decimal::ZERO);
        assert_eq!(breakdown.caution, Some(FeeCaution::NetNotPositive));
    }

    #[test]
    fn test_gross_beyond_decimal_range_is_an_error() {
        let result = calculator().compute_total_cost(
            &well_known("Fiverr"),
            &Money::new(Decimal::MAX, CurrencyCode::Dollars),
            CurrencyCode::Dollars,
        );
        assert!(matches!(result, Err(FxError::AmountOutOfRange(_))));

        let result = calculator().compute_total_cost(
            &well_known("Toptal"),
            &Money::new(Decimal::MAX, CurrencyCode::Inr),
            CurrencyCode::Pkr,
        );
        assert!(matches!(result, Err(FxError::AmountOutOfRange(_))));
    }

    #[test]
    fn test_breakdown_is_deterministic() {
        let calc = calculator();
        let profile = well_known("Fiverr");
        let gross = Money::new(dec!(733.37), CurrencyCode::Gbp);
        let first = calc.compute_total_cost(&profile, &gross, CurrencyCode::Pkr).unwrap();
        let second = calc.compute_total_cost(&profile, &gross, CurrencyCode::Pkr).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_breakdown_serializes_leg_names_in_camel_case() {
        let breakdown = calculator()
            .compute_total_cost(
                &well_known("Freelancer"),
                &Money::new(dec!(50), CurrencyCode::Dollars),
                CurrencyCode::Dollars,
            )
            .unwrap();
        let json = serde_json::to_value(&breakdown).unwrap();
        assert!(json["feesByLeg"].get("platformToLocalBank").is_some());
        assert!(json.get("caution").is_none());
        assert_eq!(json["currency"], "dollars");
    }
}
