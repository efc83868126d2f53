//! Unit registry: parsable unit names, caller-defined extension units and
//! preferred display names per dimension.

use std::collections::BTreeMap;
use std::sync::{LazyLock, PoisonError, RwLock};
use serde::{Deserialize, Serialize};
use tracing::debug;
use physunits_core::{symbol, Dimension, Quantity, QuantityError, BASE_COUNT, DIMENSION_COUNT, EXTENSION_COUNT};
use physunits_core::dimension::{
    ACTIVITY_OF_A_NUCLIDE, CAPACITANCE, DOSE_EQUIVALENT, ELECTRIC_CHARGE, ELECTRIC_CONDUCTANCE,
    ELECTRIC_POTENTIAL, ELECTRIC_RESISTANCE, ENERGY, FORCE, FREQUENCY, ILLUMINANCE, INDUCTANCE,
    LUMINOUS_FLUX, MAGNETIC_FLUX, MAGNETIC_FLUX_DENSITY, POWER, PRESSURE, SPEED,
};
use crate::si;

/// Unit quantity delivering function
pub type UnitFn = fn() -> Quantity;

/// Maximum number of caller-defined units, one per extension dimension
pub const EXTENSION_CAPACITY: usize = EXTENSION_COUNT;

/// Unit names accepted by the parser
static PREDEFINED_UNITS: [(&str, UnitFn); 31] = [
    // SI base units
    ("m", si::meter),
    ("kg", si::kilogram),
    ("s", si::second),
    ("A", si::ampere),
    ("K", si::kelvin),
    ("mol", si::mole),
    ("cd", si::candela),
    // SI coherent derived units with special names
    ("g", si::gram),
    ("Hz", si::hertz),
    ("N", si::newton),
    ("Pa", si::pascal),
    ("J", si::joule),
    ("W", si::watt),
    ("C", si::coulomb),
    ("V", si::volt),
    ("F", si::farad),
    ("Ohm", si::ohm),
    ("S", si::siemens),
    ("Wb", si::weber),
    ("T", si::tesla),
    ("H", si::henry),
    ("'C", si::degree_celsius),
    ("lm", si::lumen),
    ("lx", si::lux),
    ("Bq", si::becquerel),
    ("Gy", si::gray),
    ("Sv", si::sievert),
    // accepted for use with the SI
    ("d", si::day),
    ("min", si::minute),
    ("h", si::hour),
    ("l", si::liter),
];

/// Display names, in priority order: the first name listed for a dimension wins
fn predefined_names() -> Vec<(Dimension, &'static str)> {
    let mut names = vec![
        (Dimension::LENGTH, "m"),
        (Dimension::MASS, "kg"),
        (Dimension::TIME, "s"),
        (Dimension::CURRENT, "A"),
        (Dimension::TEMPERATURE, "K"),
        (Dimension::AMOUNT, "mol"),
        (Dimension::LUMINOSITY, "cd"),
        (FREQUENCY, "Hz"),
        (FORCE, "N"),
        (PRESSURE, "Pa"),
        (ENERGY, "J"),
        (POWER, "W"),
        (ELECTRIC_CHARGE, "C"),
        (ELECTRIC_POTENTIAL, "V"),
        (CAPACITANCE, "F"),
        (ELECTRIC_RESISTANCE, "Ohm"),
        (ELECTRIC_CONDUCTANCE, "S"),
        (MAGNETIC_FLUX, "Wb"),
        (MAGNETIC_FLUX_DENSITY, "T"),
        (INDUCTANCE, "H"),
        (LUMINOUS_FLUX, "lm"),
        (ILLUMINANCE, "lx"),
        (ACTIVITY_OF_A_NUCLIDE, "Bq"),
        (DOSE_EQUIVALENT, "Sv"),
        (SPEED, "m/s"),
        (ELECTRIC_POTENTIAL.quotient(&Dimension::TIME), "V/s"),
    ];
    names.extend(Dimension::EXTRA.iter().zip(EXTENSION_NAMES).map(|(d, n)| (*d, n)));
    names
}

const EXTENSION_NAMES: [&str; EXTENSION_COUNT] =
    ["x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7", "x8", "x9"];

/// A caller-defined unit occupying one extension dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
    pub dimension: Dimension,
}

/// Registry of known units and display names
#[derive(Debug, Clone)]
pub struct Registry {
    units: BTreeMap<&'static str, UnitFn>,
    extensions: Vec<Extension>,
    names: BTreeMap<Dimension, String>,
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Registry {
            units: PREDEFINED_UNITS.iter().copied().collect(),
            extensions: Vec::with_capacity(EXTENSION_CAPACITY),
            names: BTreeMap::new(),
        };
        registry.register_predefined_names();
        registry
    }

    fn register_predefined_names(&mut self) {
        for (dimension, name) in predefined_names() {
            self.names.entry(dimension).or_insert_with(|| name.to_string());
        }
    }

    /// Unit quantity for `name`, without defining anything
    pub fn lookup(&self, name: &str) -> Option<Quantity> {
        if let Some(f) = self.units.get(name) {
            return Some(f());
        }
        self.extensions
            .iter()
            .find(|ext| ext.name == name)
            .map(|ext| Quantity::unit(ext.dimension))
    }

    /// True if `name` is a predefined or previously defined unit
    pub fn has_unit(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Unit quantity for `name`.
    ///
    /// Unknown names fail with a unit error unless `extend` is set, in which
    /// case the name is bound to the next free extension dimension.
    pub fn unit(&mut self, name: &str, extend: bool) -> Result<Quantity, QuantityError> {
        match self.lookup(name) {
            Some(q) => Ok(q),
            None if extend => self.define_unit(name),
            None => Err(QuantityError::undefined_unit(name)),
        }
    }

    /// Bind `name` to the next free extension dimension and make it that
    /// dimension's display name.
    pub fn define_unit(&mut self, name: &str) -> Result<Quantity, QuantityError> {
        if let Some(q) = self.lookup(name) {
            return Ok(q);
        }
        let index = self.extensions.len();
        let dimension = *Dimension::EXTRA
            .get(index)
            .ok_or_else(|| QuantityError::extension_table_full(name))?;

        self.extensions.push(Extension {
            name: name.to_string(),
            dimension,
        });
        self.define_unit_name(dimension, name);
        debug!(unit = name, slot = index, "defined extension unit");

        Ok(Quantity::unit(dimension))
    }

    /// Set the display name for a dimension, replacing any earlier name
    pub fn define_unit_name(&mut self, dimension: Dimension, name: impl Into<String>) {
        self.names.insert(dimension, name.into());
    }

    pub fn has_unit_name(&self, dimension: &Dimension) -> bool {
        self.names.contains_key(dimension)
    }

    /// The display name registered for exactly this dimension
    pub fn name_of(&self, dimension: &Dimension) -> Option<&str> {
        self.names.get(dimension).map(String::as_str)
    }

    /// Caller-defined units, in slot order
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_extension_full(&self) -> bool {
        self.extensions.len() >= EXTENSION_CAPACITY
    }

    /// Drop all caller-defined units and restore the default names of the
    /// extension dimensions.
    pub fn reset_extensions(&mut self) {
        self.extensions.clear();
        for (dimension, name) in Dimension::EXTRA.iter().zip(EXTENSION_NAMES) {
            self.define_unit_name(*dimension, name);
        }
    }

    fn slot_label(&self, index: usize) -> String {
        match self.name_of(&Dimension::single(index, 1)) {
            Some(name) => name.to_string(),
            None => symbol::default_symbol(index),
        }
    }

    /// Symbol for a dimension, e.g. `"N"` or `"m kg s-2"`.
    ///
    /// With `prefer_name`, a name registered for the whole dimension is used
    /// as is, and a name for the SI part replaces its decomposition. Without
    /// it, every non-zero slot is written out in terms of base units.
    pub fn unit_symbol(&self, dimension: &Dimension, prefer_name: bool) -> String {
        if prefer_name {
            if let Some(name) = self.name_of(dimension) {
                return name.to_string();
            }
        }

        let base = dimension.base_part();
        let mut terms = match self.name_of(&base) {
            Some(name) if prefer_name => vec![name.to_string()],
            _ => symbol::terms(dimension, 0..BASE_COUNT, |i| self.slot_label(i)),
        };
        terms.extend(symbol::terms(dimension, BASE_COUNT..DIMENSION_COUNT, |i| self.slot_label(i)));
        terms.join(" ")
    }

    /// Symbol expressed in the base units only
    pub fn base_unit_symbols(&self, dimension: &Dimension) -> String {
        self.unit_symbol(dimension, false)
    }

    /// Name of the unit of a dimension, preferring registered names
    pub fn unit_name(&self, dimension: &Dimension) -> String {
        self.unit_symbol(dimension, true)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry used by the convenience functions
static GLOBAL: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::new()));

pub fn global() -> &'static RwLock<Registry> {
    &GLOBAL
}

/// Run `f` with shared access to the global registry
pub fn with_global<R>(f: impl FnOnce(&Registry) -> R) -> R {
    let registry = GLOBAL.read().unwrap_or_else(PoisonError::into_inner);
    f(&registry)
}

/// Run `f` with exclusive access to the global registry
pub fn with_global_mut<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut registry = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut registry)
}

// Free functions over the global registry

pub fn unit(name: &str, extend: bool) -> Result<Quantity, QuantityError> {
    with_global_mut(|r| r.unit(name, extend))
}

pub fn has_unit_name(dimension: &Dimension) -> bool {
    with_global(|r| r.has_unit_name(dimension))
}

pub fn unit_name(dimension: &Dimension) -> String {
    with_global(|r| r.unit_name(dimension))
}

pub fn unit_symbol(dimension: &Dimension, prefer_name: bool) -> String {
    with_global(|r| r.unit_symbol(dimension, prefer_name))
}

pub fn base_unit_symbols(dimension: &Dimension) -> String {
    with_global(|r| r.base_unit_symbols(dimension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use physunits_core::dimension::{AREA, VOLUME};
    use physunits_core::numfmt::format_general;

    /// Fixed-point magnitude plus base-unit symbols
    fn b(q: Quantity) -> String {
        let reg = Registry::new();
        format!("{:.6} {}", q.value(), reg.base_unit_symbols(&q.dimension()))
    }

    /// Fixed-point magnitude plus named symbol
    fn s(q: Quantity) -> String {
        let reg = Registry::new();
        format!("{:.6} {}", q.value(), reg.unit_symbol(&q.dimension(), true))
    }

    #[test]
    fn test_predefined_units() {
        let reg = Registry::new();
        for (name, _) in PREDEFINED_UNITS.iter() {
            assert!(reg.has_unit(name), "missing {}", name);
        }
        assert_eq!(reg.lookup("min").map(|q| q.value()), Some(60.0));
        assert_eq!(reg.lookup("'C").map(|q| q.dimension()), Some(Dimension::TEMPERATURE));
        assert!(reg.lookup("foo").is_none());
    }

    #[test]
    fn test_base_symbols() {
        assert_eq!(b(si::newton()), "1.000000 m kg s-2");
        assert_eq!(b(si::farad()), "1.000000 m-2 kg-1 s+4 A+2");
        assert_eq!(b(si::lumen()), "1.000000 cd");
        assert_eq!(b(si::hertz()), "1.000000 s-1");
        assert_eq!(b(si::liter()), "0.001000 m+3");
    }

    #[test]
    fn test_named_symbols() {
        assert_eq!(s(si::newton()), "1.000000 N");
        assert_eq!(s(si::ohm()), "1.000000 Ohm");
        assert_eq!(s(si::meter() / si::second()), "1.000000 m/s");
        assert_eq!(s(si::volt() / si::second()), "1.000000 V/s");
        // first predefined name wins for shared dimensions
        assert_eq!(s(si::becquerel()), "1.000000 Hz");
        assert_eq!(s(si::lumen()), "1.000000 cd");
        assert_eq!(s(si::gray()), "1.000000 Sv");
        // no name: falls back to the decomposition
        assert_eq!(s(si::meter() * si::meter()), "1.000000 m+2");
    }

    #[test]
    fn test_unknown_unit_fails_without_extend() {
        let mut reg = Registry::new();
        let err = reg.unit("foo", false).unwrap_err();
        assert!(matches!(err, QuantityError::Unit(_)));
        assert_eq!(err.to_string(), "quantity: undefined unit 'foo'");
        assert_eq!(reg.extension_count(), 0);
    }

    #[test]
    fn test_extension_units() {
        let mut reg = Registry::new();
        let foo = reg.unit("foo", true).unwrap();
        assert_eq!(foo.dimension(), Dimension::EXTRA[0]);
        assert_eq!(foo.value(), 1.0);

        // now known without extend, same dimension, no new slot
        let again = reg.unit("foo", false).unwrap();
        assert_eq!(again.dimension(), foo.dimension());
        assert_eq!(reg.extension_count(), 1);

        let bar = reg.unit("bar", true).unwrap();
        assert_eq!(bar.dimension(), Dimension::EXTRA[1]);
        assert_eq!(reg.name_of(&Dimension::EXTRA[1]), Some("bar"));
        assert_eq!(
            reg.extensions().iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["foo", "bar"]
        );
    }

    #[test]
    fn test_predefined_units_are_not_extended() {
        let mut reg = Registry::new();
        assert_eq!(reg.unit("m", true).unwrap().dimension(), Dimension::LENGTH);
        assert_eq!(reg.extension_count(), 0);
    }

    #[test]
    fn test_extension_table_full() {
        let mut reg = Registry::new();
        for i in 0..EXTENSION_CAPACITY {
            reg.unit(&format!("u{}", i), true).unwrap();
        }
        assert!(reg.is_extension_full());
        let err = reg.unit("eleven", true).unwrap_err();
        assert!(matches!(err, QuantityError::Unit(_)));
        assert_eq!(
            err.to_string(),
            "quantity: dimension extension table full, while trying to add 'eleven'"
        );
        // existing extensions still resolve
        assert_eq!(reg.unit("u9", false).unwrap().dimension(), Dimension::EXTRA[9]);
    }

    #[test]
    fn test_reset_extensions() {
        let mut reg = Registry::new();
        reg.unit("apple", true).unwrap();
        reg.reset_extensions();
        assert_eq!(reg.extension_count(), 0);
        assert!(!reg.has_unit("apple"));
        assert_eq!(reg.name_of(&Dimension::EXTRA[0]), Some("x0"));
        assert_eq!(reg.unit("pear", true).unwrap().dimension(), Dimension::EXTRA[0]);
    }

    #[test]
    fn test_extension_symbols() {
        let mut reg = Registry::new();
        let apple = reg.unit("apple", true).unwrap();
        let per_apple = si::meter() / si::second() / apple;
        assert_eq!(reg.unit_symbol(&apple.dimension(), true), "apple");
        assert_eq!(reg.unit_symbol(&per_apple.dimension(), true), "m/s apple-1");
        assert_eq!(reg.base_unit_symbols(&per_apple.dimension()), "m s-1 apple-1");
        assert_eq!(reg.unit_symbol(&(si::number() * 2.0).dimension(), true), "");
    }

    #[test]
    fn test_define_unit_name_last_writer_wins() {
        let mut reg = Registry::new();
        reg.define_unit_name(FREQUENCY, "Bq");
        assert_eq!(reg.unit_name(&FREQUENCY), "Bq");
        reg.define_unit_name(AREA, "m2");
        assert!(reg.has_unit_name(&AREA));
        assert_eq!(reg.unit_name(&AREA), "m2");
        // base names feed the decomposition
        reg.define_unit_name(Dimension::LENGTH, "metre");
        assert_eq!(reg.base_unit_symbols(&VOLUME), "metre+3");
    }

    #[test]
    fn test_global_free_functions() {
        assert!(has_unit_name(&FORCE));
        assert_eq!(unit_name(&FORCE), "N");
        assert_eq!(unit_symbol(&ENERGY, false), "m+2 kg s-2");
        assert_eq!(base_unit_symbols(&PRESSURE), "m-1 kg s-2");
        let hour = unit("h", false).unwrap();
        assert_eq!(format_general(hour.value(), 6), "3600");
        assert!(unit("definitely-not-a-unit", false).is_err());
    }
}
