use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{
    Quantity,
    cost::Cost,
    rate::{GigabyteMonthRate, GigabyteRate},
    time::Months,
};

/// Data volume.
pub type Gigabytes = Quantity<f64, 1, 0, 0>;

/// Retained data volume: a volume held for a number of months.
pub type GigabyteMonths = Quantity<f64, 1, 1, 0>;

impl Display for Gigabytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} GB", self.0)
    }
}

impl Debug for Gigabytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}GB", self.0)
    }
}

impl Mul<Months> for Gigabytes {
    type Output = GigabyteMonths;

    fn mul(self, rhs: Months) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Mul<GigabyteRate> for Gigabytes {
    type Output = Cost;

    fn mul(self, rhs: GigabyteRate) -> Self::Output {
        Cost::from(self.0 * rhs.0)
    }
}

impl Mul<GigabyteMonthRate> for GigabyteMonths {
    type Output = Cost;

    fn mul(self, rhs: GigabyteMonthRate) -> Self::Output {
        Cost::from(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_retention_pricing() {
        let stored = Gigabytes::from(10.0) * Months::from(3.0);
        assert_relative_eq!((stored * GigabyteMonthRate::from(0.01)).0, 0.3);
    }

    #[test]
    fn test_egress_pricing() {
        assert_relative_eq!((Gigabytes::from(100.0) * GigabyteRate::from(0.09)).0, 9.0);
    }
}
