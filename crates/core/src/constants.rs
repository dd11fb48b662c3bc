/// Fractional digits used when formatting amounts for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 0;

/// Upper bound for a platform's percentage fee
pub const MAX_FEE_PERCENTAGE: u32 = 100;
