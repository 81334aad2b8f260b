use phf::{Map, phf_map};
use thiserror::Error;

static VDW_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 1.20, "C" => 1.70, "N" => 1.55, "O" => 1.52,
    "F" => 1.47, "P" => 1.80, "S" => 1.80, "Cl" => 1.75,
    "Br" => 1.85, "I" => 1.98, "Si" => 2.10, "Se" => 1.90,
    "As" => 1.85, "B" => 1.92, "Li" => 1.82, "Na" => 2.27,
    "K" => 2.75, "Ca" => 2.31, "Zn" => 1.39, "Cu" => 1.40,
    "Fe" => 1.32, "Mg" => 1.73,
};

static COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.31, "C" => 0.76, "N" => 0.71, "O" => 0.66,
    "F" => 0.57, "P" => 1.07, "S" => 1.05, "Cl" => 1.02,
    "Br" => 1.20, "I" => 1.39, "Si" => 1.11, "Se" => 1.19,
    "As" => 1.21, "B" => 0.84, "Li" => 1.28, "Na" => 1.66,
    "K" => 1.96, "Ca" => 1.71, "Zn" => 1.22, "Cu" => 1.32,
    "Fe" => 1.32, "Mg" => 1.41,
};

static COULOMB_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.50, "C" => 1.00, "N" => 1.10, "O" => 1.20,
    "F" => 1.30, "P" => 1.40, "S" => 1.50, "Cl" => 1.60,
    "Br" => 1.70, "I" => 1.80, "Si" => 1.30, "Se" => 1.60,
    "As" => 1.65, "B" => 0.95, "Li" => 0.76, "Na" => 1.02,
    "K" => 1.38, "Ca" => 1.14, "Zn" => 0.87, "Cu" => 0.96,
    "Fe" => 1.04, "Mg" => 0.86,
};

static ATOMIC_NUMBERS: Map<&'static str, u32> = phf_map! {
    "H" => 1, "C" => 6, "N" => 7, "O" => 8,
    "F" => 9, "P" => 15, "S" => 16, "Cl" => 17,
    "Br" => 35, "I" => 53, "Si" => 14, "Se" => 34,
    "As" => 33, "B" => 5, "Li" => 3, "Na" => 11,
    "K" => 19, "Ca" => 20, "Zn" => 30, "Cu" => 29,
    "Fe" => 26, "Mg" => 12,
};

/// Names the lookup table that failed, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTableKind {
    VdwRadius,
    CovalentRadius,
    CoulombRadius,
    AtomicNumber,
}

impl std::fmt::Display for ElementTableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::VdwRadius => "VDW radii",
            Self::CovalentRadius => "covalent radii",
            Self::CoulombRadius => "Coulomb radii",
            Self::AtomicNumber => "atomic numbers",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ElementError {
    #[error("Element '{symbol}' not found in {table} table")]
    NotFound {
        table: ElementTableKind,
        symbol: String,
    },
}

/// Read-only per-element physical constants consumed by the force-field core.
///
/// Implementations must be immutable after construction so that a single
/// instance can be shared across threads without locking.
pub trait ElementProperties: Sync {
    fn vdw_radius(&self, symbol: &str) -> Result<f64, ElementError>;
    fn covalent_radius(&self, symbol: &str) -> Result<f64, ElementError>;
    fn coulomb_radius(&self, symbol: &str) -> Result<f64, ElementError>;
    fn atomic_number(&self, symbol: &str) -> Result<u32, ElementError>;
    fn has_element(&self, symbol: &str) -> bool;
}

/// The built-in element table, backed by compile-time perfect-hash maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardElements;

fn lookup<T: Copy>(
    map: &Map<&'static str, T>,
    table: ElementTableKind,
    symbol: &str,
) -> Result<T, ElementError> {
    map.get(symbol)
        .copied()
        .ok_or_else(|| ElementError::NotFound {
            table,
            symbol: symbol.to_string(),
        })
}

impl ElementProperties for StandardElements {
    fn vdw_radius(&self, symbol: &str) -> Result<f64, ElementError> {
        lookup(&VDW_RADII, ElementTableKind::VdwRadius, symbol)
    }

    fn covalent_radius(&self, symbol: &str) -> Result<f64, ElementError> {
        lookup(&COVALENT_RADII, ElementTableKind::CovalentRadius, symbol)
    }

    fn coulomb_radius(&self, symbol: &str) -> Result<f64, ElementError> {
        lookup(&COULOMB_RADII, ElementTableKind::CoulombRadius, symbol)
    }

    fn atomic_number(&self, symbol: &str) -> Result<u32, ElementError> {
        lookup(&ATOMIC_NUMBERS, ElementTableKind::AtomicNumber, symbol)
    }

    // Membership is defined by the VDW table.
    fn has_element(&self, symbol: &str) -> bool {
        VDW_RADII.contains_key(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_return_tabulated_values_for_carbon() {
        let table = StandardElements;
        assert_eq!(table.vdw_radius("C"), Ok(1.70));
        assert_eq!(table.covalent_radius("C"), Ok(0.76));
        assert_eq!(table.coulomb_radius("C"), Ok(1.00));
        assert_eq!(table.atomic_number("C"), Ok(6));
    }

    #[test]
    fn lookups_match_symbols_exactly() {
        let table = StandardElements;
        assert_eq!(table.atomic_number("Cl"), Ok(17));
        assert!(matches!(
            table.atomic_number(" Cl "),
            Err(ElementError::NotFound { .. })
        ));
        assert!(table.vdw_radius("C ").is_err());
        assert!(!table.has_element(" Cl"));
        assert!(table.atomic_number("CL").is_err());
        assert!(!table.has_element("cl"));
    }

    #[test]
    fn has_element_reports_known_and_unknown_symbols() {
        let table = StandardElements;
        assert!(table.has_element("Fe"));
        assert!(table.has_element("H"));
        assert!(!table.has_element("Xx"));
        assert!(!table.has_element(""));
    }

    #[test]
    fn unknown_symbol_fails_with_not_found_naming_the_table() {
        let table = StandardElements;
        let err = table.coulomb_radius("Uuo").unwrap_err();
        assert_eq!(
            err,
            ElementError::NotFound {
                table: ElementTableKind::CoulombRadius,
                symbol: "Uuo".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Element 'Uuo' not found in Coulomb radii table"
        );
    }

    #[test]
    fn every_tabulated_element_is_present_in_all_tables() {
        let table = StandardElements;
        for symbol in VDW_RADII.keys() {
            assert!(table.covalent_radius(symbol).is_ok(), "{symbol}");
            assert!(table.coulomb_radius(symbol).is_ok(), "{symbol}");
            assert!(table.atomic_number(symbol).is_ok(), "{symbol}");
        }
        assert_eq!(VDW_RADII.len(), ATOMIC_NUMBERS.len());
    }

    #[test]
    fn table_can_be_shared_across_threads() {
        let table = StandardElements;
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| assert_eq!(table.atomic_number("O"), Ok(8)));
            }
        });
    }
}
