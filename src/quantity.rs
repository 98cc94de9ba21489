pub mod cost;
pub mod data;
pub mod rate;
pub mod time;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// Dimensioned scalar: `DATA` is gigabytes, `TIME` is months, `COST` is dollars.
///
/// Concrete measures are aliases of this carrier, and cross-alias multiplications
/// are implemented manually next to the aliases they produce.
#[derive(
    Clone,
    Copy,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
pub struct Quantity<T, const DATA: isize, const TIME: isize, const COST: isize>(pub T);

impl<const DATA: isize, const TIME: isize, const COST: isize> Quantity<f64, DATA, TIME, COST> {
    pub const ZERO: Self = Self(0.0);
}

impl<const DATA: isize, const TIME: isize, const COST: isize> Default
    for Quantity<f64, DATA, TIME, COST>
{
    fn default() -> Self {
        Self::ZERO
    }
}

impl<T, const DATA: isize, const TIME: isize, const COST: isize> Mul<T>
    for Quantity<T, DATA, TIME, COST>
where
    T: Mul<T>,
{
    type Output = Quantity<T::Output, DATA, TIME, COST>;

    fn mul(self, rhs: T) -> Self::Output {
        Quantity(self.0 * rhs)
    }
}

impl<T, const DATA: isize, const TIME: isize, const COST: isize> Div<T>
    for Quantity<T, DATA, TIME, COST>
where
    T: Div<T>,
{
    type Output = Quantity<T::Output, DATA, TIME, COST>;

    fn div(self, rhs: T) -> Self::Output {
        Quantity(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Bare = Quantity<f64, 0, 0, 0>;

    #[test]
    fn test_scalar_mul() {
        assert!((Bare::from(2.0) * 3.0 - Bare::from(6.0)).0.abs() < f64::EPSILON);
    }
}
