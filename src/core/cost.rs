pub const BASE_TECH_COST: f64 = 20.0;
pub const MIN_TECH_COST: u32 = 10;

/// Classic research cost from the number of direct prerequisites:
/// `base * (1 + n) * sqrt(1 + n) / 2`, floored, never below the minimum.
pub fn tech_cost(num_direct_reqs: usize) -> u32 {
    let factor = (1 + num_direct_reqs) as f64;
    let cost = (BASE_TECH_COST * factor * factor.sqrt() / 2.0).floor() as u32;
    cost.max(MIN_TECH_COST)
}
