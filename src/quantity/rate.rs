use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Dollars per gigabyte moved.
pub type GigabyteRate = Quantity<f64, -1, 0, 1>;

/// Dollars per gigabyte retained for one month.
pub type GigabyteMonthRate = Quantity<f64, -1, -1, 1>;

impl Display for GigabyteRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.4}/GB", self.0)
    }
}

impl Debug for GigabyteRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.4}/GB", self.0)
    }
}

impl Display for GigabyteMonthRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.5}/GB·mo", self.0)
    }
}

impl Debug for GigabyteMonthRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.5}/GB·mo", self.0)
    }
}
