//! Engineering notation
//!
//! Magnitudes are rounded to a number of significant digits and shown with
//! an exponent that is a multiple of three, written as a metric prefix when
//! the unit allows it: `4.7 kOhm`, `12.5 m/s`, `150 µs`. Mass keeps the
//! exponent form since its base unit already carries "kilo": `2.5e3 kg`.

use std::fmt;

use physunits_core::numfmt::format_general;
use physunits_core::{Dimension, Quantity};
use physunits_units::prefix::{engineering_symbol, ENGINEERING_MAX_EXPONENT, ENGINEERING_MIN_EXPONENT};
use physunits_units::Registry;

pub const DEFAULT_DIGITS: usize = 6;

/// Glyph for the micro prefix
pub const MICRO_GLYPH: &str = "µ";

/// A quantity laid out in engineering notation.
#[derive(Debug, Clone)]
pub struct EngFormat {
    quantity: Quantity,
    digits: usize,
    show_sign: bool,
    fixed: bool,
    micro: &'static str,
    symbol: String,
    named: bool,
}

impl EngFormat {
    /// Prepare `q` for display with `digits` significant digits; `show_sign`
    /// adds a '+' to non-negative magnitudes.
    pub fn new(q: &Quantity, digits: usize, show_sign: bool, registry: &Registry) -> Self {
        let dimension = q.dimension();
        Self {
            quantity: *q,
            digits: digits.max(1),
            show_sign,
            fixed: false,
            micro: MICRO_GLYPH,
            symbol: registry.unit_symbol(&dimension, true),
            named: registry.has_unit_name(&dimension),
        }
    }

    /// Print the magnitude in fixed-point with all requested digits, "4.70000"
    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn with_micro(mut self, glyph: &'static str) -> Self {
        self.micro = glyph;
        self
    }

    pub fn magnitude(&self) -> String {
        self.layout().0
    }

    /// Prefix glyph plus unit symbol
    pub fn unit(&self) -> String {
        self.layout().1
    }

    /// "<magnitude> <prefix><symbol>"
    pub fn repr(&self) -> String {
        let (magnitude, unit) = self.layout();
        format!("{} {}", magnitude, unit)
    }

    fn layout(&self) -> (String, String) {
        let value = self.quantity.value();
        let sign = if value < 0.0 {
            "-"
        } else if self.show_sign {
            "+"
        } else {
            ""
        };
        let mut value = value.abs();

        if !value.is_finite() {
            return (format!("{}{}", sign, format_general(value, DEFAULT_DIGITS)), self.symbol.clone());
        }

        let mut digits = self.digits as i32;
        let mut exponent = if value == 0.0 { 0 } else { value.log10().floor() as i32 };

        // round to the requested digits; value is non-negative here
        let scaled = scale(value, digits - 1 - exponent);
        let mut display = scaled.trunc();
        if scaled - display >= 0.5 {
            display += 1.0;
        }
        // display * 10^(exponent - digits + 1), shifted to the aligned exponent
        let rounded_exponent = exponent - digits + 1;
        exponent = if display == 0.0 { 0 } else { align(exponent) };
        value = scale(display, rounded_exponent - exponent);

        if value >= 1000.0 {
            value /= 1000.0;
            exponent += 3;
        } else if value >= 100.0 {
            digits -= 2;
        } else if value >= 10.0 {
            digits -= 1;
        }

        let number = if self.fixed {
            format!("{}{:.*}", sign, (digits - 1).max(0) as usize, value)
        } else {
            format!("{}{}", sign, format_general(value, self.digits.max(DEFAULT_DIGITS)))
        };

        match self.prefix_glyph(exponent) {
            Some(glyph) => (number, format!("{}{}", glyph, self.symbol)),
            None => (format!("{}e{}", number, exponent), self.symbol.clone()),
        }
    }

    /// Prefix for `exponent`, if the quantity has a single unit name other
    /// than the kilogram and the exponent is within the prefix range.
    fn prefix_glyph(&self, exponent: i32) -> Option<&'static str> {
        let fits = self.quantity.dimension() != Dimension::MASS
            && self.named
            && (ENGINEERING_MIN_EXPONENT..=ENGINEERING_MAX_EXPONENT).contains(&exponent);
        if !fits {
            return None;
        }
        engineering_symbol(exponent, self.micro)
    }
}

impl fmt::Display for EngFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}

/// Multiple of three for `exponent`; non-positive exponents drop a whole
/// group, which the >= 1000 check in `layout` takes back.
fn align(exponent: i32) -> i32 {
    if exponent > 0 {
        (exponent / 3) * 3
    } else {
        ((-exponent + 3) / 3) * -3
    }
}

/// value * 10^n, dividing for negative n to keep decimal fractions exact.
/// Past 10^300 the power is applied in two halves so it stays finite for
/// subnormal values.
fn scale(value: f64, n: i32) -> f64 {
    if n.abs() > 300 {
        let half = n / 2;
        return scale(scale(value, half), n - half);
    }
    if n >= 0 {
        value * 10f64.powi(n)
    } else {
        value / 10f64.powi(-n)
    }
}

pub fn to_eng_magnitude(q: &Quantity, digits: usize, show_sign: bool, registry: &Registry) -> String {
    EngFormat::new(q, digits, show_sign, registry).magnitude()
}

pub fn to_eng_unit(q: &Quantity, registry: &Registry) -> String {
    EngFormat::new(q, DEFAULT_DIGITS, false, registry).unit()
}

pub fn to_eng_string(q: &Quantity, digits: usize, show_sign: bool, registry: &Registry) -> String {
    EngFormat::new(q, digits, show_sign, registry).repr()
}
