use serde::{Deserialize, Serialize};

use crate::quantity::cost::Cost;

/// Progressive volume pricing.
///
/// A monthly allowance is free; the rest consumes the tiers in order. Volume
/// beyond the last tier keeps billing at the last tier's price — there is no
/// further discount.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RateLadder {
    /// Monthly allowance priced at zero, in the ladder's native unit.
    #[serde(default, rename = "freeUnits")]
    pub free_units: f64,

    /// Ordered tiers.
    pub tiers: Vec<RateTier>,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct RateTier {
    /// Tier capacity, in the ladder's native unit.
    pub units: f64,

    /// Price per unit within this tier.
    pub price: Cost,
}

impl RateLadder {
    /// Price the volume: subtract the free allowance, then consume each tier in order,
    /// accumulating `min(remaining, tier capacity) × tier price`.
    pub fn price(&self, volume: f64) -> Cost {
        let mut remaining = (volume - self.free_units).max(0.0);
        let mut total = Cost::ZERO;
        for tier in &self.tiers {
            let billed = remaining.min(tier.units);
            total += tier.price * billed;
            remaining -= billed;
        }
        if let Some(last) = self.tiers.last() {
            // Beyond the defined ladder, the last price applies indefinitely:
            total += last.price * remaining;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn ladder() -> RateLadder {
        RateLadder {
            free_units: 100.0,
            tiers: vec![
                RateTier { units: 400.0, price: Cost::from(0.09) },
                RateTier { units: 500.0, price: Cost::from(0.07) },
            ],
        }
    }

    #[test]
    fn test_free_allowance_is_free() {
        assert_eq!(ladder().price(100.0), Cost::ZERO);
    }

    #[test]
    fn test_one_unit_above_allowance() {
        assert_relative_eq!(ladder().price(101.0).0, 0.09);
    }

    #[test]
    fn test_tier_boundary_sums_lower_tiers() {
        // 400 units at $0.09, the free allowance fully consumed:
        assert_relative_eq!(ladder().price(500.0).0, 36.0);
    }

    #[test]
    fn test_beyond_last_tier_keeps_last_price() {
        // 400 × 0.09 + 500 × 0.07 + 1000 × 0.07:
        assert_relative_eq!(ladder().price(2000.0).0, 36.0 + 35.0 + 70.0);
    }

    #[test]
    fn test_zero_volume() {
        assert_eq!(ladder().price(0.0), Cost::ZERO);
    }
}
