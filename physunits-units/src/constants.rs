//! Physical constants

use physunits_core::Quantity;
use physunits_core::functions::square;
use crate::si::{coulomb, joule, kilogram, meter, mole, second};

/// Standard acceleration of free fall
pub fn g_n() -> Quantity {
    9.80665 * meter() / square(second())
}

/// Avogadro constant
pub fn n_a() -> Quantity {
    6.02214199e23 / mole()
}

/// Electronvolt
pub fn ev() -> Quantity {
    1.60217733e-19 * joule()
}

/// Elementary charge
pub fn e() -> Quantity {
    1.602176462e-19 * coulomb()
}

/// Planck constant
pub fn h() -> Quantity {
    6.62606876e-34 * joule() * second()
}

/// Speed of light in a vacuum
pub fn c() -> Quantity {
    299792458.0 * meter() / second()
}

/// Unified atomic mass unit
pub fn u() -> Quantity {
    1.6605402e-27 * kilogram()
}
