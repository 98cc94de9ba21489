use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Monthly dollars.
pub type Cost = Quantity<f64, 0, 0, 1>;

impl Cost {
    /// Round to whole cents, for stable rendering.
    pub fn round_to_cents(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.4}", self.0)
    }
}
