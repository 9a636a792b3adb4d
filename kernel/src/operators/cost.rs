//! Exact fixed-point path costs.
//!
//! Costs are counted in tenths so the diagonal step (1.4) is exact and
//! frontier keys have a total order with no float comparisons.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// A non-negative cost in tenths of a unit step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cost(u32);

/// Cost of an orthogonal blank move (1.0).
pub const ORTHOGONAL: Cost = Cost(10);

/// Cost of a diagonal blank move (1.4).
pub const DIAGONAL: Cost = Cost(14);

impl Cost {
    /// The zero cost.
    pub const ZERO: Self = Self(0);

    /// Construct from a count of tenths.
    #[must_use]
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    /// The raw count of tenths.
    #[must_use]
    pub const fn tenths(self) -> u32 {
        self.0
    }

    /// Decimal value (`Cost::from_tenths(14).as_f64() == 1.4`).
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// `self` repeated `n` times.
    #[must_use]
    pub const fn times(self, n: u32) -> Self {
        Self(self.0 * n)
    }

    /// Difference, floored at zero.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    /// Honors the precision flag (`{:.2}` prints `1.40`); one decimal by default.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(1);
        write!(f, "{:.*}", precision, self.as_f64())
    }
}
