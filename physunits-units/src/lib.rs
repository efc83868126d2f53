//! PhysUnits Units - Prefixes, SI units and the unit registry
//!
//! - `prefix`: metric prefix table (y .. Y, da) and binary prefix factors
//! - `si`: SI base, derived and accepted units as quantity constructors
//! - `constants`: a handful of physical constants
//! - `registry`: parsable unit names, extension units and display names

pub mod constants;
pub mod prefix;
pub mod registry;
pub mod si;

pub use prefix::{has_prefix, prefix, Prefix, PREFIXES};
pub use registry::{Extension, Registry, UnitFn, EXTENSION_CAPACITY};
pub use registry::{base_unit_symbols, has_unit_name, unit, unit_name, unit_symbol};
