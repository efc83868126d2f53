//! Metric prefixes
//!
//! Prefix codes are matched exactly; an unknown code is an error, never a
//! silent factor of 1.

use serde::Serialize;
use physunits_core::QuantityError;

/// A decimal SI prefix
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prefix {
    /// Code used in unit expressions ("k", "da", "u")
    pub symbol: &'static str,
    pub name: &'static str,
    /// Power of ten
    pub exponent: i32,
    pub factor: f64,
}

pub const YOTTA: f64 = 1e24;
pub const ZETTA: f64 = 1e21;
pub const EXA: f64 = 1e18;
pub const PETA: f64 = 1e15;
pub const TERA: f64 = 1e12;
pub const GIGA: f64 = 1e9;
pub const MEGA: f64 = 1e6;
pub const KILO: f64 = 1e3;
pub const HECTO: f64 = 1e2;
pub const DEKA: f64 = 1e1;
pub const DECA: f64 = DEKA;
pub const DECI: f64 = 1e-1;
pub const CENTI: f64 = 1e-2;
pub const MILLI: f64 = 1e-3;
pub const MICRO: f64 = 1e-6;
pub const NANO: f64 = 1e-9;
pub const PICO: f64 = 1e-12;
pub const FEMTO: f64 = 1e-15;
pub const ATTO: f64 = 1e-18;
pub const ZEPTO: f64 = 1e-21;
pub const YOCTO: f64 = 1e-24;

// Binary prefixes. These are factors only; unit expressions do not accept them.
pub const KIBI: f64 = 1024.0;
pub const MEBI: f64 = 1024.0 * KIBI;
pub const GIBI: f64 = 1024.0 * MEBI;
pub const TEBI: f64 = 1024.0 * GIBI;
pub const PEBI: f64 = 1024.0 * TEBI;
pub const EXBI: f64 = 1024.0 * PEBI;
pub const ZEBI: f64 = 1024.0 * EXBI;
pub const YOBI: f64 = 1024.0 * ZEBI;

/// Recognized prefixes, most frequently used first
pub static PREFIXES: [Prefix; 20] = [
    Prefix { symbol: "m", name: "milli", exponent: -3, factor: MILLI },
    Prefix { symbol: "k", name: "kilo", exponent: 3, factor: KILO },
    Prefix { symbol: "u", name: "micro", exponent: -6, factor: MICRO },
    Prefix { symbol: "M", name: "mega", exponent: 6, factor: MEGA },
    Prefix { symbol: "n", name: "nano", exponent: -9, factor: NANO },
    Prefix { symbol: "G", name: "giga", exponent: 9, factor: GIGA },
    Prefix { symbol: "p", name: "pico", exponent: -12, factor: PICO },
    Prefix { symbol: "T", name: "tera", exponent: 12, factor: TERA },
    Prefix { symbol: "f", name: "femto", exponent: -15, factor: FEMTO },
    Prefix { symbol: "P", name: "peta", exponent: 15, factor: PETA },
    Prefix { symbol: "a", name: "atto", exponent: -18, factor: ATTO },
    Prefix { symbol: "E", name: "exa", exponent: 18, factor: EXA },
    Prefix { symbol: "z", name: "zepto", exponent: -21, factor: ZEPTO },
    Prefix { symbol: "Z", name: "zetta", exponent: 21, factor: ZETTA },
    Prefix { symbol: "y", name: "yocto", exponent: -24, factor: YOCTO },
    Prefix { symbol: "Y", name: "yotta", exponent: 24, factor: YOTTA },
    Prefix { symbol: "h", name: "hecto", exponent: 2, factor: HECTO },
    Prefix { symbol: "da", name: "deka", exponent: 1, factor: DEKA },
    Prefix { symbol: "d", name: "deci", exponent: -1, factor: DECI },
    Prefix { symbol: "c", name: "centi", exponent: -2, factor: CENTI },
];

/// Range of exponents covered by engineering prefixes (y..Y)
pub const ENGINEERING_MIN_EXPONENT: i32 = -24;
pub const ENGINEERING_MAX_EXPONENT: i32 = 24;

/// Look up a prefix by its code
pub fn find_prefix(code: &str) -> Option<&'static Prefix> {
    PREFIXES.iter().find(|p| p.symbol == code)
}

/// True if `code` is a recognized prefix
pub fn has_prefix(code: &str) -> bool {
    find_prefix(code).is_some()
}

/// Factor for the given prefix code
pub fn prefix(code: &str) -> Result<f64, QuantityError> {
    find_prefix(code)
        .map(|p| p.factor)
        .ok_or_else(|| QuantityError::unrecognized_prefix(code))
}

/// Prefix glyph for an engineering exponent (a multiple of 3 in -24..=24).
///
/// Exponent 0 gives the empty glyph; micro is rendered with `micro`.
pub fn engineering_symbol(exponent: i32, micro: &'static str) -> Option<&'static str> {
    if exponent == 0 {
        return Some("");
    }
    if exponent == -6 {
        return Some(micro);
    }
    if exponent % 3 != 0 {
        return None;
    }
    PREFIXES
        .iter()
        .find(|p| p.exponent == exponent)
        .map(|p| p.symbol)
}
