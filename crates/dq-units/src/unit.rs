//! The `Unit` value type and its algebra.
//!
//! A `Unit` is an immutable product of named catalog units raised to signed
//! integer exponents, e.g. `km**2*s**-1`. Two units are *consistent* when
//! they are structurally equal; they are *compatible* when their aggregate
//! base dimensions match, in which case a scalar conversion factor exists
//! (`km` and `m` are compatible but not consistent).

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::catalog;
use crate::dimension::Dimensions;
use crate::error::{UnitsError, UnitsResult};

/// A physical unit: symbol -> exponent, with zero exponents elided.
///
/// The empty product is the dimensionless sentinel (`Unit::dimensionless()`).
/// Every symbol appearing in a `Unit` originates from the catalog, so scale
/// and dimension lookups cannot miss.
#[derive(Debug, Clone, Eq)]
pub struct Unit {
    terms: BTreeMap<&'static str, i32>,
}

impl Unit {
    /// The dimensionless identity unit (NULL_UNIT in the data model).
    pub fn dimensionless() -> Unit {
        Unit {
            terms: BTreeMap::new(),
        }
    }

    /// Resolve a catalog symbol or alias into a unit.
    pub fn named(symbol: &str) -> UnitsResult<Unit> {
        let entry = catalog::lookup(symbol).ok_or_else(|| UnitsError::UnknownSymbol {
            symbol: symbol.to_string(),
        })?;
        Ok(Unit::from_entry(entry))
    }

    pub(crate) fn from_entry(entry: &'static catalog::UnitCatalogEntry) -> Unit {
        let mut terms = BTreeMap::new();
        terms.insert(entry.symbol, 1);
        Unit { terms }
    }

    /// True for the empty product *or* any combination whose base dimensions
    /// cancel (`km/m` is dimensionless with an si factor of 1000).
    pub fn is_dimensionless(&self) -> bool {
        self.dimensions().is_none()
    }

    /// True only for the empty product (the NULL_UNIT sentinel itself).
    pub fn is_null(&self) -> bool {
        self.terms.is_empty()
    }

    /// Aggregate base-dimension exponents.
    pub fn dimensions(&self) -> Dimensions {
        let mut dims = Dimensions::NONE;
        for (symbol, &exp) in &self.terms {
            if let Some(entry) = catalog::lookup(symbol) {
                dims = dims.mul(&entry.dimensions().powi(exp));
            }
        }
        dims
    }

    /// Scale factor relative to the coherent SI unit of the same dimension.
    pub fn si_factor(&self) -> f64 {
        let mut factor = 1.0;
        for (symbol, &exp) in &self.terms {
            if let Some(entry) = catalog::lookup(symbol) {
                factor *= entry.si_factor.powi(exp);
            }
        }
        factor
    }

    pub fn mul(&self, other: &Unit) -> Unit {
        let mut terms = self.terms.clone();
        for (symbol, &exp) in &other.terms {
            let slot = terms.entry(symbol).or_insert(0);
            *slot += exp;
            if *slot == 0 {
                terms.remove(symbol);
            }
        }
        Unit { terms }
    }

    pub fn div(&self, other: &Unit) -> Unit {
        self.mul(&other.recip())
    }

    pub fn powi(&self, exp: i32) -> Unit {
        if exp == 0 {
            return Unit::dimensionless();
        }
        let terms = self
            .terms
            .iter()
            .map(|(&symbol, &e)| (symbol, e * exp))
            .collect();
        Unit { terms }
    }

    pub fn recip(&self) -> Unit {
        self.powi(-1)
    }

    /// Scalar factor converting values in `self` into values in `to`.
    ///
    /// Errors when the two units differ in dimension; the error carries both
    /// units and both dimension descriptors.
    pub fn conversion_factor(&self, to: &Unit) -> UnitsResult<f64> {
        let from_dims = self.dimensions();
        let to_dims = to.dimensions();
        if from_dims != to_dims {
            return Err(UnitsError::Conversion {
                from: self.clone(),
                from_dims,
                to: to.clone(),
                to_dims,
            });
        }
        Ok(self.si_factor() / to.si_factor())
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (symbol, exp) in &self.terms {
            symbol.hash(state);
            exp.hash(state);
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "dimensionless");
        }
        let mut first = true;
        for (symbol, &exp) in &self.terms {
            if !first {
                write!(f, "*")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{symbol}**{exp}")?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Unit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::unit_catalog;
    use proptest::prelude::*;

    fn arb_unit() -> impl Strategy<Value = Unit> {
        let catalog = unit_catalog();
        prop::collection::vec((0..catalog.len(), -3_i32..=3), 0..4).prop_map(|picks| {
            let catalog = unit_catalog();
            let mut unit = Unit::dimensionless();
            for (idx, exp) in picks {
                let term = Unit::from_entry(&catalog[idx]).powi(exp);
                unit = unit.mul(&term);
            }
            unit
        })
    }

    proptest! {
        #[test]
        fn mul_is_commutative(a in arb_unit(), b in arb_unit()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn recip_cancels(a in arb_unit()) {
            prop_assert!(a.mul(&a.recip()).is_null());
        }

        #[test]
        fn product_dimensions_add(a in arb_unit(), b in arb_unit()) {
            prop_assert_eq!(a.mul(&b).dimensions(), a.dimensions().mul(&b.dimensions()));
        }

        #[test]
        fn conversion_round_trips(a in arb_unit(), b in arb_unit()) {
            if let Ok(forward) = a.conversion_factor(&b) {
                let back = b.conversion_factor(&a).unwrap();
                prop_assert!((forward * back - 1.0).abs() < 1e-9);
            }
        }
    }
}
