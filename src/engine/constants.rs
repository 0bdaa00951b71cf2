/// Seeds in one purchasing unit of corn, regardless of seed size.
pub const CORN_SEEDS_PER_UNIT: f64 = 80_000.0;

/// Seeds in one purchasing unit of soybeans, regardless of seed size.
pub const SOYBEAN_SEEDS_PER_UNIT: f64 = 140_000.0;

/// Pounds in a bushel for seeding-rate conversion.
pub const LBS_PER_BUSHEL: f64 = 60.0;

/// Return multiples reported alongside breakeven.
pub const ROI_MULTIPLES: [u32; 4] = [2, 3, 4, 5];

/// Upper bound of a discount percentage.
pub const MAX_DISCOUNT_PERCENT: f64 = 100.0;

/// Crops sold in fixed seed-count units instead of by weight.
pub fn fixed_seeds_per_unit(crop: &str) -> Option<f64> {
    match crop.trim().to_lowercase().as_str() {
        "corn" => Some(CORN_SEEDS_PER_UNIT),
        "soybeans" => Some(SOYBEAN_SEEDS_PER_UNIT),
        _ => None,
    }
}
