//! Platform fees module - fee profiles, the registry service, and withdrawal cost calculation.

mod fee_chain_calculator;
mod platform_fees_constants;
mod platform_fees_errors;
mod platform_fees_model;
mod platform_fees_service;
mod platform_fees_traits;


pub use fee_chain_calculator::{FeeBreakdown, FeeCaution, FeeChainCalculator};
pub use platform_fees_constants::*;
pub use platform_fees_errors::PlatformFeeError;
pub use platform_fees_model::{
    FeeLeg, FeeLegs, FeeProfile, FeeProfileFilter, LegName, NewFeeProfile, OwnerScope,
};
pub use platform_fees_service::PlatformFeeRegistry;
pub use platform_fees_traits::{FeeProfileRepositoryTrait, FeeProfileServiceTrait};
