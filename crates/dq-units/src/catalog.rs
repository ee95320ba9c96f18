//! Named-unit catalog and physical constants.
//!
//! A thin static table: each entry carries a symbol, a display name, alias
//! spellings, base-dimension exponents, and the scale factor to the coherent
//! SI unit of that dimension. The unit algebra resolves symbols against this
//! table; it is never mutated at runtime.

use crate::dimension::{BaseDim, Dimensions};
use crate::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCatalogEntry {
    pub symbol: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub dims: &'static [(BaseDim, i32)],
    pub si_factor: f64,
}

impl UnitCatalogEntry {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_pairs(self.dims)
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.symbol.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

use BaseDim::{Amount, Current, Length, LuminousIntensity, Mass, Temperature, Time};

const UNIT_CATALOG: [UnitCatalogEntry; 22] = [
    UnitCatalogEntry {
        symbol: "m",
        display_name: "meter",
        aliases: &["meter", "metre"],
        dims: &[(Length, 1)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "km",
        display_name: "kilometer",
        aliases: &["kilometer", "kilometre"],
        dims: &[(Length, 1)],
        si_factor: 1.0e3,
    },
    UnitCatalogEntry {
        symbol: "cm",
        display_name: "centimeter",
        aliases: &["centimeter"],
        dims: &[(Length, 1)],
        si_factor: 1.0e-2,
    },
    UnitCatalogEntry {
        symbol: "mm",
        display_name: "millimeter",
        aliases: &["millimeter"],
        dims: &[(Length, 1)],
        si_factor: 1.0e-3,
    },
    UnitCatalogEntry {
        symbol: "kg",
        display_name: "kilogram",
        aliases: &["kilogram"],
        dims: &[(Mass, 1)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "g",
        display_name: "gram",
        aliases: &["gram"],
        dims: &[(Mass, 1)],
        si_factor: 1.0e-3,
    },
    UnitCatalogEntry {
        symbol: "s",
        display_name: "second",
        aliases: &["second", "sec"],
        dims: &[(Time, 1)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "ms",
        display_name: "millisecond",
        aliases: &["millisecond"],
        dims: &[(Time, 1)],
        si_factor: 1.0e-3,
    },
    UnitCatalogEntry {
        symbol: "us",
        display_name: "microsecond",
        aliases: &["microsecond"],
        dims: &[(Time, 1)],
        si_factor: 1.0e-6,
    },
    UnitCatalogEntry {
        symbol: "min",
        display_name: "minute",
        aliases: &["minute"],
        dims: &[(Time, 1)],
        si_factor: 60.0,
    },
    UnitCatalogEntry {
        symbol: "h",
        display_name: "hour",
        aliases: &["hour"],
        dims: &[(Time, 1)],
        si_factor: 3600.0,
    },
    UnitCatalogEntry {
        symbol: "A",
        display_name: "ampere",
        aliases: &["ampere", "amp"],
        dims: &[(Current, 1)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "K",
        display_name: "kelvin",
        aliases: &["kelvin"],
        dims: &[(Temperature, 1)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "mol",
        display_name: "mole",
        aliases: &["mole"],
        dims: &[(Amount, 1)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "cd",
        display_name: "candela",
        aliases: &["candela"],
        dims: &[(LuminousIntensity, 1)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "Hz",
        display_name: "hertz",
        aliases: &["hertz"],
        dims: &[(Time, -1)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "N",
        display_name: "newton",
        aliases: &["newton"],
        dims: &[(Mass, 1), (Length, 1), (Time, -2)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "J",
        display_name: "joule",
        aliases: &["joule"],
        dims: &[(Mass, 1), (Length, 2), (Time, -2)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "W",
        display_name: "watt",
        aliases: &["watt"],
        dims: &[(Mass, 1), (Length, 2), (Time, -3)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "Pa",
        display_name: "pascal",
        aliases: &["pascal"],
        dims: &[(Mass, 1), (Length, -1), (Time, -2)],
        si_factor: 1.0,
    },
    UnitCatalogEntry {
        symbol: "mi",
        display_name: "mile",
        aliases: &["mile"],
        dims: &[(Length, 1)],
        si_factor: 1609.344,
    },
    UnitCatalogEntry {
        symbol: "ft",
        display_name: "foot",
        aliases: &["foot", "feet"],
        dims: &[(Length, 1)],
        si_factor: 0.3048,
    },
];

pub fn unit_catalog() -> &'static [UnitCatalogEntry] {
    &UNIT_CATALOG
}

/// Exact symbol lookup, then alias lookup.
pub fn lookup(symbol: &str) -> Option<&'static UnitCatalogEntry> {
    unit_catalog()
        .iter()
        .find(|entry| entry.symbol == symbol)
        .or_else(|| {
            unit_catalog()
                .iter()
                .find(|entry| entry.aliases.contains(&symbol))
        })
}

/// Substring search over symbols, names, and aliases.
pub fn filter_unit_catalog(query: &str) -> Vec<&'static UnitCatalogEntry> {
    unit_catalog()
        .iter()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

macro_rules! unit_ctor {
    ($(#[$doc:meta])* $name:ident, $symbol:literal) => {
        $(#[$doc])*
        #[inline]
        pub fn $name() -> Unit {
            // Symbols listed here are present in UNIT_CATALOG.
            match lookup($symbol) {
                Some(entry) => Unit::from_entry(entry),
                None => Unit::dimensionless(),
            }
        }
    };
}

unit_ctor!(meter, "m");
unit_ctor!(kilometer, "km");
unit_ctor!(centimeter, "cm");
unit_ctor!(millimeter, "mm");
unit_ctor!(kilogram, "kg");
unit_ctor!(gram, "g");
unit_ctor!(second, "s");
unit_ctor!(millisecond, "ms");
unit_ctor!(minute, "min");
unit_ctor!(hour, "h");
unit_ctor!(kelvin, "K");
unit_ctor!(hertz, "Hz");
unit_ctor!(newton, "N");
unit_ctor!(joule, "J");
unit_ctor!(watt, "W");
unit_ctor!(pascal, "Pa");

pub mod constants {
    use super::*;

    /// Standard gravity, m/s**2.
    pub const G0_MPS2: f64 = 9.806_65;
    /// Speed of light in vacuum, m/s.
    pub const C_MPS: f64 = 299_792_458.0;
    /// Newtonian constant of gravitation, m**3/(kg*s**2).
    pub const BIG_G: f64 = 6.674_30e-11;
    /// Boltzmann constant, J/K.
    pub const K_B: f64 = 1.380_649e-23;
    /// Planck constant, J*s.
    pub const PLANCK_H: f64 = 6.626_070_15e-34;

    #[inline]
    pub fn standard_gravity() -> (f64, Unit) {
        (G0_MPS2, meter().div(&second().powi(2)))
    }

    #[inline]
    pub fn speed_of_light() -> (f64, Unit) {
        (C_MPS, meter().div(&second()))
    }

    #[inline]
    pub fn gravitational_constant() -> (f64, Unit) {
        (
            BIG_G,
            meter().powi(3).div(&kilogram().mul(&second().powi(2))),
        )
    }

    #[inline]
    pub fn boltzmann_constant() -> (f64, Unit) {
        (K_B, joule().div(&kelvin()))
    }

    #[inline]
    pub fn planck_constant() -> (f64, Unit) {
        (PLANCK_H, joule().mul(&second()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn symbols_are_unique() {
        let mut seen = HashSet::new();
        for entry in unit_catalog() {
            assert!(
                seen.insert(entry.symbol),
                "duplicate unit symbol: {}",
                entry.symbol
            );
        }
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(lookup("kilometre").map(|e| e.symbol), Some("km"));
        assert_eq!(lookup("sec").map(|e| e.symbol), Some("s"));
        assert!(lookup("parsec").is_none());
    }

    #[test]
    fn search_finds_kilometer() {
        let results = filter_unit_catalog("kilo");
        assert!(results.iter().any(|entry| entry.symbol == "km"));
        assert!(results.iter().any(|entry| entry.symbol == "kg"));
    }

    #[test]
    fn constants_carry_units() {
        let (g0, unit) = constants::standard_gravity();
        assert_eq!(g0, constants::G0_MPS2);
        assert_eq!(format!("{unit}"), "m*s**-2");

        let (_, c_unit) = constants::speed_of_light();
        assert!(!c_unit.is_dimensionless());
    }

    #[test]
    fn derived_units_have_composite_dimensions() {
        let n = newton();
        let dims = format!("{}", n.dimensions());
        assert!(dims.contains("(mass)"));
        assert!(dims.contains("(length)"));
        assert!(dims.contains("(time)**-2"));
    }
}
