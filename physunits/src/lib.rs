//! PhysUnits - run-time physical quantities
//!
//! Parses unit expressions like "45 km/h" into dimension-checked quantities
//! and prints them back in standard or engineering notation.
//!
//! The free functions here work on the process-wide registry; the `_in`
//! variants and [`QuantityParser`] take an explicitly owned [`Registry`].

mod eng;
mod format;
mod parser;

pub use physunits_core::{
    codes, dimension, functions, numfmt, symbol, Dimension, Operator, ParserError, Quantity,
    QuantityError, BASE_COUNT, DIMENSION_COUNT, EXTENSION_COUNT,
};
pub use physunits_units::{constants, prefix, registry, si};
pub use physunits_units::{has_prefix, Extension, Prefix, Registry, EXTENSION_CAPACITY, PREFIXES};
pub use physunits_units::{base_unit_symbols, has_unit_name, unit, unit_name, unit_symbol};

pub use eng::{EngFormat, DEFAULT_DIGITS, MICRO_GLYPH};
pub use format::{format_fixed, value_to_string, DEFAULT_PRECISION};
pub use parser::{ParserOptions, QuantityParser};

use physunits_units::registry::{with_global, with_global_mut};

/// Prelude for convenient imports
pub mod prelude {
    pub use physunits_core::prelude::*;
    pub use physunits_units::prefix::*;
    pub use physunits_units::si::*;
    pub use crate::{to_eng_string, to_quantity, to_string, EngFormat, ParserOptions, QuantityParser, Registry};
}

// ========== Parsing ==========

/// Parse `text` into a quantity, defining extension units in the global registry as allowed
pub fn to_quantity(text: &str, options: ParserOptions) -> Result<Quantity, QuantityError> {
    with_global_mut(|registry| to_quantity_in(registry, text, options))
}

/// The unit part of `text`: "45 km/h" gives 1000/3600 m/s
pub fn to_unit(text: &str, options: ParserOptions) -> Result<Quantity, QuantityError> {
    with_global_mut(|registry| to_unit_in(registry, text, options))
}

/// The leading number of `text`: "45 km/h" gives 45
pub fn to_numerical_value(text: &str, options: ParserOptions) -> Result<f64, QuantityError> {
    with_global_mut(|registry| to_numerical_value_in(registry, text, options))
}

pub fn to_quantity_in(
    registry: &mut Registry,
    text: &str,
    options: ParserOptions,
) -> Result<Quantity, QuantityError> {
    QuantityParser::new(registry).options(options).parse(text)
}

pub fn to_unit_in(
    registry: &mut Registry,
    text: &str,
    options: ParserOptions,
) -> Result<Quantity, QuantityError> {
    let mut parser = QuantityParser::new(registry).options(options);
    let q = parser.parse(text)?;
    Ok(Quantity::new(q.dimension(), q.value() / parser.numerical_value()))
}

pub fn to_numerical_value_in(
    registry: &mut Registry,
    text: &str,
    options: ParserOptions,
) -> Result<f64, QuantityError> {
    let mut parser = QuantityParser::new(registry).options(options);
    parser.parse(text)?;
    Ok(parser.numerical_value())
}

// ========== Formatting ==========

/// "<magnitude> <symbol>" using the global registry's names
pub fn to_string(q: &Quantity, prefer_name: bool) -> String {
    with_global(|registry| format::to_string(q, prefer_name, registry))
}

pub fn to_eng_magnitude(q: &Quantity, digits: usize, show_sign: bool) -> String {
    with_global(|registry| eng::to_eng_magnitude(q, digits, show_sign, registry))
}

pub fn to_eng_unit(q: &Quantity) -> String {
    with_global(|registry| eng::to_eng_unit(q, registry))
}

/// "<magnitude> <prefix><symbol>", e.g. "4.7 kOhm"
pub fn to_eng_string(q: &Quantity, digits: usize, show_sign: bool) -> String {
    with_global(|registry| eng::to_eng_string(q, digits, show_sign, registry))
}

/// Formatting against an explicitly owned registry
pub mod text {
    pub use crate::eng::{to_eng_magnitude, to_eng_string, to_eng_unit};
    pub use crate::format::{format_fixed, to_string, value_to_string};
}
