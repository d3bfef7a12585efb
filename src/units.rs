//! Physical quantities used by the engine.
//!
//! Each quantity is a newtype over `f64` so a mass can never be added to
//! an energy by accident. Every type serializes as a bare JSON number.
//!
//! # Examples
//!
//! ```
//! use textile_footprint::units::{Kwh, Mass};
//!
//! let mass = Mass::from_kilograms(0.17) * 1.05;
//! assert!((mass.kilograms() - 0.1785).abs() < 1e-12);
//!
//! let energy = Kwh::new(1.0).to_megajoules();
//! assert!((energy.value() - 3.6).abs() < f64::EPSILON);
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Megajoules in one kilowatt-hour.
pub const MJ_PER_KWH: f64 = 3.6;

/// A mass in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mass(f64);

impl Mass {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub const fn from_kilograms(kg: f64) -> Self {
        Self(kg)
    }

    #[must_use]
    pub fn from_grams(g: f64) -> Self {
        Self(g / 1000.0)
    }

    #[must_use]
    pub const fn kilograms(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn grams(self) -> f64 {
        self.0 * 1000.0
    }

    #[must_use]
    pub fn tonnes(self) -> f64 {
        self.0 / 1000.0
    }
}

/// Electrical energy in kilowatt-hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kwh(f64);

impl Kwh {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn to_megajoules(self) -> Megajoules {
        Megajoules(self.0 * MJ_PER_KWH)
    }
}

/// Thermal energy in megajoules.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megajoules(f64);

impl Megajoules {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn to_kwh(self) -> Kwh {
        Kwh(self.0 / MJ_PER_KWH)
    }
}

/// Greenhouse-gas emissions in kilograms of CO2-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Co2e(f64);

impl Co2e {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub const fn from_kilograms(kg: f64) -> Self {
        Self(kg)
    }

    #[must_use]
    pub const fn kilograms(self) -> f64 {
        self.0
    }
}

macro_rules! scalar_ops {
    ($ty:ident, $unit:literal) => {
        impl Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $ty {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $ty {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl Sum for $ty {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::ZERO, Add::add)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.0, $unit)
            }
        }
    };
}

scalar_ops!(Mass, "kg");
scalar_ops!(Kwh, "kWh");
scalar_ops!(Megajoules, "MJ");
scalar_ops!(Co2e, "kgCO2e");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_grams_and_tonnes() {
        let m = Mass::from_grams(170.0);
        assert!((m.kilograms() - 0.17).abs() < 1e-12);
        assert!((m.grams() - 170.0).abs() < 1e-9);
        assert!((m.tonnes() - 0.000_17).abs() < 1e-15);
    }

    #[test]
    fn test_energy_conversion_is_explicit_and_reversible() {
        let kwh = Kwh::new(2.5);
        let mj = kwh.to_megajoules();
        assert!((mj.value() - 9.0).abs() < 1e-12);
        assert!((mj.to_kwh().value() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_same_dimension_arithmetic() {
        let total = Mass::from_kilograms(1.0) + Mass::from_kilograms(0.5) - Mass::from_kilograms(0.25);
        assert!((total.kilograms() - 1.25).abs() < 1e-12);
        assert!(((total / 5.0).kilograms() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_co2_sum() {
        let total: Co2e = [1.0, 2.0, 0.5].into_iter().map(Co2e::from_kilograms).sum();
        assert!((total.kilograms() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_units_serialize_as_numbers() {
        let json = serde_json::to_string(&Mass::from_kilograms(0.17)).unwrap();
        assert_eq!(json, "0.17");
        let back: Co2e = serde_json::from_str("4.2").unwrap();
        assert_eq!(back, Co2e::from_kilograms(4.2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Kwh::new(1.5)), "1.5 kWh");
        assert_eq!(format!("{}", Co2e::from_kilograms(2.0)), "2 kgCO2e");
    }
}
