use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{FeeLeg, LegName, NewFeeProfile};
use crate::fx::CurrencyCode;

/// Message returned when a caller tries to remove a system-provided profile.
pub const WELL_KNOWN_DELETE_FORBIDDEN: &str = "cannot delete well-known platform settings";

/// Fee schedules shipped for the common freelance platforms, seeded under the system scope.
pub fn well_known_platforms() -> Vec<NewFeeProfile> {
    vec![
        NewFeeProfile::new("Fiverr", dec!(20))
            .with_leg(
                LegName::PlatformToPayoneer,
                FeeLeg::new(dec!(3), CurrencyCode::Dollars),
            )
            .with_leg(
                LegName::PayoneerToLocalBank,
                FeeLeg::new(dec!(1), CurrencyCode::Dollars),
            ),
        NewFeeProfile::new("Freelancer", dec!(10)).with_leg(
            LegName::PlatformToLocalBank,
            FeeLeg::new(dec!(1), CurrencyCode::Dollars),
        ),
        NewFeeProfile::new("Upwork", dec!(10)).with_leg(
            LegName::PlatformToLocalBank,
            FeeLeg::new(dec!(0.99), CurrencyCode::Dollars),
        ),
        NewFeeProfile::new("Toptal", Decimal::ZERO),
        NewFeeProfile::new("99designs", dec!(15)),
    ]
}
