//! SI units and units accepted for use with the SI
//!
//! Each unit is a zero-argument constructor returning magnitude-in-SI times
//! the unit's dimension, so `45.0 * si::hour()` is 162000 s.

use physunits_core::{Dimension, Quantity};
use physunits_core::functions::{cube, square};

// Base units

/// Dimensionless unit
pub fn number() -> Quantity {
    Quantity::number(1.0)
}

pub fn meter() -> Quantity {
    Quantity::unit(Dimension::LENGTH)
}

pub fn kilogram() -> Quantity {
    Quantity::unit(Dimension::MASS)
}

pub fn second() -> Quantity {
    Quantity::unit(Dimension::TIME)
}

pub fn ampere() -> Quantity {
    Quantity::unit(Dimension::CURRENT)
}

pub fn kelvin() -> Quantity {
    Quantity::unit(Dimension::TEMPERATURE)
}

pub fn mole() -> Quantity {
    Quantity::unit(Dimension::AMOUNT)
}

pub fn candela() -> Quantity {
    Quantity::unit(Dimension::LUMINOSITY)
}

/// Unit of the given extension dimension (slot 0..10)
pub fn extension_unit(slot: usize) -> Option<Quantity> {
    Dimension::EXTRA.get(slot).copied().map(Quantity::unit)
}

// Dimensionless factors

pub const PI: f64 = std::f64::consts::PI;
pub const PERCENT: f64 = 0.01;
pub const RADIAN: f64 = 1.0;
pub const STERADIAN: f64 = 1.0;
pub const DEGREE_ANGLE: f64 = PI / 180.0;
pub const MINUTE_ANGLE: f64 = PI / 10800.0;
pub const SECOND_ANGLE: f64 = PI / 648000.0;

// Derived units with special names

pub fn gram() -> Quantity {
    kilogram() / 1000.0
}

pub fn newton() -> Quantity {
    meter() * kilogram() / square(second())
}

pub fn pascal() -> Quantity {
    newton() / square(meter())
}

pub fn joule() -> Quantity {
    newton() * meter()
}

pub fn watt() -> Quantity {
    joule() / second()
}

pub fn coulomb() -> Quantity {
    second() * ampere()
}

pub fn volt() -> Quantity {
    watt() / ampere()
}

pub fn farad() -> Quantity {
    coulomb() / volt()
}

pub fn ohm() -> Quantity {
    volt() / ampere()
}

pub fn siemens() -> Quantity {
    ampere() / volt()
}

pub fn weber() -> Quantity {
    volt() * second()
}

pub fn tesla() -> Quantity {
    weber() / square(meter())
}

pub fn henry() -> Quantity {
    weber() / ampere()
}

/// Temperature interval; same dimension and scale as kelvin
pub fn degree_celsius() -> Quantity {
    kelvin()
}

pub fn lumen() -> Quantity {
    candela() * STERADIAN
}

pub fn lux() -> Quantity {
    lumen() / meter() / meter()
}

pub fn becquerel() -> Quantity {
    1.0 / second()
}

pub fn gray() -> Quantity {
    joule() / kilogram()
}

pub fn sievert() -> Quantity {
    joule() / kilogram()
}

pub fn hertz() -> Quantity {
    1.0 / second()
}

// Units accepted for use with the SI

pub fn angstrom() -> Quantity {
    1e-10 * meter()
}

pub fn are() -> Quantity {
    1e2 * square(meter())
}

pub fn bar() -> Quantity {
    1e5 * pascal()
}

pub fn barn() -> Quantity {
    1e-28 * square(meter())
}

pub fn curie() -> Quantity {
    3.7e10 * becquerel()
}

pub fn day() -> Quantity {
    86400.0 * second()
}

/// Acceleration unit gal (not the gallon)
pub fn gal() -> Quantity {
    1e-2 * meter() / square(second())
}

pub fn hectare() -> Quantity {
    1e4 * square(meter())
}

pub fn hour() -> Quantity {
    3600.0 * second()
}

pub fn knot() -> Quantity {
    1852.0 / 3600.0 * meter() / second()
}

pub fn liter() -> Quantity {
    1e-3 * cube(meter())
}

pub fn minute() -> Quantity {
    60.0 * second()
}

pub fn mile_nautical() -> Quantity {
    1852.0 * meter()
}

/// Absorbed dose unit rad (not the radian)
pub fn rad() -> Quantity {
    1e-2 * gray()
}

pub fn rem() -> Quantity {
    1e-2 * sievert()
}

pub fn roentgen() -> Quantity {
    2.58e-4 * coulomb() / kilogram()
}

pub fn ton_metric() -> Quantity {
    1e3 * kilogram()
}

// Alternate spellings

pub fn metre() -> Quantity {
    meter()
}

pub fn litre() -> Quantity {
    liter()
}

pub fn tonne() -> Quantity {
    ton_metric()
}
