//! Money represented in integer cents.

use serde::{Deserialize, Serialize};

/// A currency amount in cents, to keep arithmetic exact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates an amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates an amount from a whole number of currency units.
    pub fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Zero.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the amount as a float number of currency units.
    ///
    /// Only for display and distance-fee arithmetic; never fed back into
    /// stored amounts without rounding through [`Money::from_cents`].
    pub fn as_units_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns true if the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a line quantity.
    pub fn times(&self, quantity: u32) -> Money {
        Self(self.0 * i64::from(quantity))
    }

    /// Returns the smaller of two amounts.
    pub fn min(self, other: Money) -> Money {
        Self(self.0.min(other.0))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{}.{:02}", (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        assert_eq!(Money::from_units(12).cents(), 1200);
        assert_eq!(Money::from_cents(1234).cents(), 1234);
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn display() {
        assert_eq!(Money::from_cents(1234).to_string(), "12.34");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!(b.times(3).cents(), 750);
        assert_eq!(a.min(b), b);
    }

    #[test]
    fn sum_of_line_totals() {
        let lines = [Money::from_cents(800).times(2), Money::from_cents(150)];
        let total: Money = lines.into_iter().sum();
        assert_eq!(total.cents(), 1750);
    }

    #[test]
    fn float_view() {
        assert!((Money::from_cents(2420).as_units_f64() - 24.2).abs() < 1e-9);
    }

    #[test]
    fn serde_roundtrip() {
        let m = Money::from_cents(999);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "999");
        assert_eq!(serde_json::from_str::<Money>(&json).unwrap(), m);
    }
}
