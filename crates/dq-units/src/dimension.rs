//! SI base dimensions and exponent vectors.

use std::fmt;

/// The seven SI base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseDim {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    LuminousIntensity,
}

pub const BASE_DIM_COUNT: usize = 7;

impl BaseDim {
    pub const ALL: [BaseDim; BASE_DIM_COUNT] = [
        BaseDim::Length,
        BaseDim::Mass,
        BaseDim::Time,
        BaseDim::Current,
        BaseDim::Temperature,
        BaseDim::Amount,
        BaseDim::LuminousIntensity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BaseDim::Length => "length",
            BaseDim::Mass => "mass",
            BaseDim::Time => "time",
            BaseDim::Current => "current",
            BaseDim::Temperature => "temperature",
            BaseDim::Amount => "amount",
            BaseDim::LuminousIntensity => "luminous_intensity",
        }
    }

    fn index(self) -> usize {
        match self {
            BaseDim::Length => 0,
            BaseDim::Mass => 1,
            BaseDim::Time => 2,
            BaseDim::Current => 3,
            BaseDim::Temperature => 4,
            BaseDim::Amount => 5,
            BaseDim::LuminousIntensity => 6,
        }
    }
}

/// Signed integer exponents over the SI base dimensions.
///
/// `Dimensions` describes the physical dimension of a unit independent of
/// scale: meters and kilometers share `(length)**1`, while meters and
/// seconds do not share anything. Used in conversion-error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions([i32; BASE_DIM_COUNT]);

impl Dimensions {
    pub const NONE: Dimensions = Dimensions([0; BASE_DIM_COUNT]);

    /// Dimension vector with a single base dimension raised to `exp`.
    pub fn base(dim: BaseDim, exp: i32) -> Self {
        let mut v = [0; BASE_DIM_COUNT];
        v[dim.index()] = exp;
        Dimensions(v)
    }

    /// Build from `(base, exponent)` pairs.
    pub fn from_pairs(pairs: &[(BaseDim, i32)]) -> Self {
        let mut v = [0; BASE_DIM_COUNT];
        for &(dim, exp) in pairs {
            v[dim.index()] += exp;
        }
        Dimensions(v)
    }

    pub fn exponent(&self, dim: BaseDim) -> i32 {
        self.0[dim.index()]
    }

    /// True if every exponent is zero (the dimensionless vector).
    pub fn is_none(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    pub fn mul(&self, other: &Dimensions) -> Dimensions {
        let mut v = self.0;
        for i in 0..BASE_DIM_COUNT {
            v[i] += other.0[i];
        }
        Dimensions(v)
    }

    pub fn powi(&self, exp: i32) -> Dimensions {
        let mut v = self.0;
        for e in &mut v {
            *e *= exp;
        }
        Dimensions(v)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "1");
        }
        let mut first = true;
        for dim in BaseDim::ALL {
            let exp = self.exponent(dim);
            if exp == 0 {
                continue;
            }
            if !first {
                write!(f, "*")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "({})", dim.name())?;
            } else {
                write!(f, "({})**{}", dim.name(), exp)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_display() {
        let dims = Dimensions::from_pairs(&[(BaseDim::Length, 1), (BaseDim::Time, -1)]);
        assert_eq!(format!("{dims}"), "(length)*(time)**-1");
    }

    #[test]
    fn mul_cancels() {
        let lt = Dimensions::base(BaseDim::Length, 1);
        let inv = lt.powi(-1);
        assert!(lt.mul(&inv).is_none());
        assert_eq!(format!("{}", lt.mul(&inv)), "1");
    }
}
