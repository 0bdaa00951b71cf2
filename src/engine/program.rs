use crate::models::{ProductCalculationResult, ProgramTotals};

/// Sum costs across both costing stages. Empty inputs give all-zero totals.
pub fn aggregate_program_cost(
    seed_results: &[ProductCalculationResult],
    foliar_results: &[ProductCalculationResult],
) -> ProgramTotals {
    seed_results
        .iter()
        .chain(foliar_results)
        .fold(ProgramTotals::default(), |acc, r| ProgramTotals {
            total_undiscounted_cost: acc.total_undiscounted_cost + r.undiscounted_cost,
            total_discounted_cost: acc.total_discounted_cost + r.discounted_cost,
            total_cost_per_acre: acc.total_cost_per_acre + r.cost_per_acre,
        })
}
