use crate::engine::constants::ROI_MULTIPLES;
use crate::error::{CalcError, Result};
use crate::models::RoiResult;

/// Yields needed to break even and to return 2:1 through 5:1 on the program.
///
/// `total_program_cost` and `market_price` must share a basis (typically
/// dollars per acre and dollars per bushel); the result is in price units
/// per acre.
pub fn project_roi(total_program_cost: f64, market_price: f64) -> Result<RoiResult> {
    if !(market_price.is_finite() && market_price > 0.0) {
        return Err(CalcError::InvalidMarketPrice(market_price));
    }
    if !total_program_cost.is_finite() {
        return Err(CalcError::InvalidInput(format!(
            "program cost must be finite, got {}",
            total_program_cost
        )));
    }

    let breakeven = total_program_cost / market_price;
    let [roi_2_to_1, roi_3_to_1, roi_4_to_1, roi_5_to_1] =
        ROI_MULTIPLES.map(|multiple| multiple as f64 * breakeven);

    // A tiny price can still overflow the quotient.
    if !(breakeven.is_finite() && roi_5_to_1.is_finite()) {
        return Err(CalcError::InvalidMarketPrice(market_price));
    }

    Ok(RoiResult {
        breakeven,
        roi_2_to_1,
        roi_3_to_1,
        roi_4_to_1,
        roi_5_to_1,
    })
}
