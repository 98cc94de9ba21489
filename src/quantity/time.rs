use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Billing months.
pub type Months = Quantity<f64, 0, 1, 0>;

impl Months {
    pub fn from_u32(months: u32) -> Self {
        Self(f64::from(months))
    }
}

impl Display for Months {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} mo", self.0)
    }
}

impl Debug for Months {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}mo", self.0)
    }
}
