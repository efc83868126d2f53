//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as a 17-element vector:
//! the 7 SI base dimensions
//! [length, mass, time, current, temperature, amount, luminosity]
//! followed by 10 extension slots for caller-defined unit kinds.

use std::fmt;
use std::ops::{DivAssign, MulAssign};
use serde::{Serialize, Deserialize};
use crate::QuantityError;

/// Number of SI base dimensions
pub const BASE_COUNT: usize = 7;

/// Number of extension dimensions
pub const EXTENSION_COUNT: usize = 10;

/// Total length of a dimension vector
pub const DIMENSION_COUNT: usize = BASE_COUNT + EXTENSION_COUNT;

/// Dimension indices for the 7 SI base quantities
pub const LENGTH: usize = 0;
pub const MASS: usize = 1;
pub const TIME: usize = 2;
pub const CURRENT: usize = 3;
pub const TEMPERATURE: usize = 4;
pub const AMOUNT: usize = 5;
pub const LUMINOSITY: usize = 6;

/// Represents the dimensions of a physical quantity
/// as exponents of the base and extension dimensions.
///
/// Ordering is lexicographic over the exponent vector. It exists so that
/// dimensions can key ordered maps; it carries no physical meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dimension {
    exponents: [i32; DIMENSION_COUNT],
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension::new();

    /// Length dimension [L]
    pub const LENGTH: Dimension = Dimension::single(LENGTH, 1);

    /// Mass dimension [M]
    pub const MASS: Dimension = Dimension::single(MASS, 1);

    /// Time dimension [T]
    pub const TIME: Dimension = Dimension::single(TIME, 1);

    /// Electric current dimension [I]
    pub const CURRENT: Dimension = Dimension::single(CURRENT, 1);

    /// Temperature dimension [Θ]
    pub const TEMPERATURE: Dimension = Dimension::single(TEMPERATURE, 1);

    /// Amount of substance dimension [N]
    pub const AMOUNT: Dimension = Dimension::single(AMOUNT, 1);

    /// Luminous intensity dimension [J]
    pub const LUMINOSITY: Dimension = Dimension::single(LUMINOSITY, 1);

    /// The ten extension dimensions, in slot order
    pub const EXTRA: [Dimension; EXTENSION_COUNT] = [
        Dimension::extra(0),
        Dimension::extra(1),
        Dimension::extra(2),
        Dimension::extra(3),
        Dimension::extra(4),
        Dimension::extra(5),
        Dimension::extra(6),
        Dimension::extra(7),
        Dimension::extra(8),
        Dimension::extra(9),
    ];

    /// Create a dimensionless dimension (all exponents zero)
    pub const fn new() -> Self {
        Dimension { exponents: [0; DIMENSION_COUNT] }
    }

    /// Create a dimension with a single slot set to the given exponent.
    ///
    /// # Panics
    ///
    /// Panics if `index >= DIMENSION_COUNT`.
    pub const fn single(index: usize, exponent: i32) -> Self {
        let mut exponents = [0; DIMENSION_COUNT];
        exponents[index] = exponent;
        Dimension { exponents }
    }

    /// Create a dimension from the exponents of the 7 SI base dimensions;
    /// the extension slots are zero.
    pub const fn si(base: [i32; BASE_COUNT]) -> Self {
        let mut exponents = [0; DIMENSION_COUNT];
        let mut i = 0;
        while i < BASE_COUNT {
            exponents[i] = base[i];
            i += 1;
        }
        Dimension { exponents }
    }

    /// The extension dimension for the given slot (0..10).
    ///
    /// # Panics
    ///
    /// Panics if `slot >= EXTENSION_COUNT`.
    pub const fn extra(slot: usize) -> Self {
        Dimension::single(BASE_COUNT + slot, 1)
    }

    /// Copy the slots `from..to` of another dimension; all other slots are zero.
    pub fn from_range(other: &Dimension, from: usize, to: usize) -> Self {
        let to = to.min(DIMENSION_COUNT);
        let mut exponents = [0; DIMENSION_COUNT];
        if from < to {
            exponents[from..to].copy_from_slice(&other.exponents[from..to]);
        }
        Dimension { exponents }
    }

    /// The SI base part of this dimension (extension slots cleared)
    pub fn base_part(&self) -> Dimension {
        Dimension::from_range(self, 0, BASE_COUNT)
    }

    /// All exponents, base dimensions first
    pub fn exponents(&self) -> &[i32; DIMENSION_COUNT] {
        &self.exponents
    }

    /// Exponent of a single slot (0 for out-of-range indices)
    pub fn exponent(&self, index: usize) -> i32 {
        self.exponents.get(index).copied().unwrap_or(0)
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.is_all_zero()
    }

    /// True if all exponents are zero
    pub fn is_all_zero(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// True if this is a base dimension: exactly one slot is set, to 1
    pub fn is_base(&self) -> bool {
        let mut non_zero = self.exponents.iter().filter(|&&e| e != 0);
        matches!((non_zero.next(), non_zero.next()), (Some(&1), None))
    }

    /// True if every exponent is an exact multiple of `n`
    pub fn is_all_multiples_of(&self, n: i32) -> bool {
        n != 0 && self.exponents.iter().all(|&e| e.wrapping_rem(n) == 0)
    }

    /// Multiply dimensions (add exponents)
    pub fn product(&self, other: &Dimension) -> Dimension {
        let mut result = *self;
        result *= *other;
        result
    }

    /// Divide dimensions (subtract exponents)
    pub fn quotient(&self, other: &Dimension) -> Dimension {
        let mut result = *self;
        result /= *other;
        result
    }

    /// Invert dimensions (negate exponents)
    pub fn reciprocal(&self) -> Dimension {
        self.power(-1)
    }

    /// Raise to integer power (multiply exponents).
    ///
    /// Exponents must stay within `i32`; use [`Dimension::checked_power`]
    /// when `n` comes from user input.
    pub fn power(&self, n: i32) -> Dimension {
        let mut result = *self;
        for e in result.exponents.iter_mut() {
            *e *= n;
        }
        result
    }

    /// Product that fails instead of overflowing an exponent
    pub fn checked_product(&self, other: &Dimension) -> Result<Dimension, QuantityError> {
        self.zip_with(other, i32::checked_add)
    }

    /// Quotient that fails instead of overflowing an exponent
    pub fn checked_quotient(&self, other: &Dimension) -> Result<Dimension, QuantityError> {
        self.zip_with(other, i32::checked_sub)
    }

    /// Power that fails instead of overflowing an exponent
    pub fn checked_power(&self, n: i32) -> Result<Dimension, QuantityError> {
        let mut result = *self;
        for e in result.exponents.iter_mut() {
            *e = e.checked_mul(n).ok_or_else(QuantityError::exponent_overflow)?;
        }
        Ok(result)
    }

    fn zip_with(
        &self,
        other: &Dimension,
        op: fn(i32, i32) -> Option<i32>,
    ) -> Result<Dimension, QuantityError> {
        let mut result = *self;
        for (e, r) in result.exponents.iter_mut().zip(other.exponents) {
            *e = op(*e, r).ok_or_else(QuantityError::exponent_overflow)?;
        }
        Ok(result)
    }

    /// Integer root (divide exponents); every exponent must be a multiple of `n`
    pub fn root(&self, n: i32) -> Result<Dimension, QuantityError> {
        if !self.is_all_multiples_of(n) {
            return Err(QuantityError::not_even_multiple());
        }
        let mut result = *self;
        for e in result.exponents.iter_mut() {
            // i32::MIN / -1
            *e = e.checked_div(n).ok_or_else(QuantityError::exponent_overflow)?;
        }
        Ok(result)
    }

    /// Format as the exponent vector, for example "1,0,-1,0,0,0,0,0,...,"
    pub fn exponents_string(&self) -> String {
        self.exponents.iter().map(|e| format!("{},", e)).collect()
    }
}

impl MulAssign for Dimension {
    fn mul_assign(&mut self, rhs: Dimension) {
        for (e, r) in self.exponents.iter_mut().zip(rhs.exponents) {
            *e += r;
        }
    }
}

impl DivAssign for Dimension {
    fn div_assign(&mut self, rhs: Dimension) {
        for (e, r) in self.exponents.iter_mut().zip(rhs.exponents) {
            *e -= r;
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; DIMENSION_COUNT] = [
            "L", "M", "T", "I", "Θ", "N", "J",
            "X0", "X1", "X2", "X3", "X4", "X5", "X6", "X7", "X8", "X9",
        ];
        let mut parts = Vec::new();

        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp != 0 {
                if exp == 1 {
                    parts.push(NAMES[i].to_string());
                } else {
                    parts.push(format!("{}^{}", NAMES[i], exp));
                }
            }
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

// The rest of the standard dimensional types, as listed in NIST SP 811.

pub const ABSORBED_DOSE: Dimension = Dimension::si([2, 0, -2, 0, 0, 0, 0]);
pub const ABSORBED_DOSE_RATE: Dimension = Dimension::si([2, 0, -3, 0, 0, 0, 0]);
pub const ACCELERATION: Dimension = Dimension::si([1, 0, -2, 0, 0, 0, 0]);
pub const ACTIVITY_OF_A_NUCLIDE: Dimension = Dimension::si([0, 0, -1, 0, 0, 0, 0]);
pub const ANGULAR_VELOCITY: Dimension = Dimension::si([0, 0, -1, 0, 0, 0, 0]);
pub const ANGULAR_ACCELERATION: Dimension = Dimension::si([0, 0, -2, 0, 0, 0, 0]);
pub const AREA: Dimension = Dimension::si([2, 0, 0, 0, 0, 0, 0]);
pub const CAPACITANCE: Dimension = Dimension::si([-2, -1, 4, 2, 0, 0, 0]);
pub const CONCENTRATION: Dimension = Dimension::si([-3, 0, 0, 0, 0, 1, 0]);
pub const CURRENT_DENSITY: Dimension = Dimension::si([-2, 0, 0, 1, 0, 0, 0]);
pub const DOSE_EQUIVALENT: Dimension = Dimension::si([2, 0, -2, 0, 0, 0, 0]);
pub const DYNAMIC_VISCOSITY: Dimension = Dimension::si([-1, 1, -1, 0, 0, 0, 0]);
pub const ELECTRIC_CHARGE: Dimension = Dimension::si([0, 0, 1, 1, 0, 0, 0]);
pub const ELECTRIC_CHARGE_DENSITY: Dimension = Dimension::si([-3, 0, 1, 1, 0, 0, 0]);
pub const ELECTRIC_CONDUCTANCE: Dimension = Dimension::si([-2, -1, 3, 2, 0, 0, 0]);
pub const ELECTRIC_FIELD_STRENGTH: Dimension = Dimension::si([1, 1, -3, -1, 0, 0, 0]);
pub const ELECTRIC_FLUX_DENSITY: Dimension = Dimension::si([-2, 0, 1, 1, 0, 0, 0]);
pub const ELECTRIC_POTENTIAL: Dimension = Dimension::si([2, 1, -3, -1, 0, 0, 0]);
pub const ELECTRIC_RESISTANCE: Dimension = Dimension::si([2, 1, -3, -2, 0, 0, 0]);
pub const ENERGY: Dimension = Dimension::si([2, 1, -2, 0, 0, 0, 0]);
pub const ENERGY_DENSITY: Dimension = Dimension::si([-1, 1, -2, 0, 0, 0, 0]);
pub const EXPOSURE: Dimension = Dimension::si([0, -1, 1, 1, 0, 0, 0]);
pub const FORCE: Dimension = Dimension::si([1, 1, -2, 0, 0, 0, 0]);
pub const FREQUENCY: Dimension = Dimension::si([0, 0, -1, 0, 0, 0, 0]);
pub const HEAT_CAPACITY: Dimension = Dimension::si([2, 1, -2, 0, -1, 0, 0]);
pub const HEAT_DENSITY: Dimension = Dimension::si([0, 1, -2, 0, 0, 0, 0]);
pub const HEAT_DENSITY_FLOW_RATE: Dimension = Dimension::si([0, 1, -3, 0, 0, 0, 0]);
pub const HEAT_FLOW_RATE: Dimension = Dimension::si([2, 1, -3, 0, 0, 0, 0]);
pub const HEAT_FLUX_DENSITY: Dimension = Dimension::si([0, 1, -3, 0, 0, 0, 0]);
pub const HEAT_TRANSFER_COEFFICIENT: Dimension = Dimension::si([0, 1, -3, 0, -1, 0, 0]);
pub const ILLUMINANCE: Dimension = Dimension::si([-2, 0, 0, 0, 0, 0, 1]);
pub const INDUCTANCE: Dimension = Dimension::si([2, 1, -2, -2, 0, 0, 0]);
pub const IRRADIANCE: Dimension = Dimension::si([0, 1, -3, 0, 0, 0, 0]);
pub const KINEMATIC_VISCOSITY: Dimension = Dimension::si([2, 0, -1, 0, 0, 0, 0]);
pub const LUMINANCE: Dimension = Dimension::si([-2, 0, 0, 0, 0, 0, 1]);
pub const LUMINOUS_FLUX: Dimension = Dimension::si([0, 0, 0, 0, 0, 0, 1]);
pub const MAGNETIC_FIELD_STRENGTH: Dimension = Dimension::si([-1, 0, 0, 1, 0, 0, 0]);
pub const MAGNETIC_FLUX: Dimension = Dimension::si([2, 1, -2, -1, 0, 0, 0]);
pub const MAGNETIC_FLUX_DENSITY: Dimension = Dimension::si([0, 1, -2, -1, 0, 0, 0]);
pub const MAGNETIC_PERMEABILITY: Dimension = Dimension::si([1, 1, -2, -2, 0, 0, 0]);
pub const MASS_DENSITY: Dimension = Dimension::si([-3, 1, 0, 0, 0, 0, 0]);
pub const MASS_FLOW_RATE: Dimension = Dimension::si([0, 1, -1, 0, 0, 0, 0]);
pub const MOLAR_ENERGY: Dimension = Dimension::si([2, 1, -2, 0, 0, -1, 0]);
pub const MOLAR_ENTROPY: Dimension = Dimension::si([2, 1, -2, -1, 0, -1, 0]);
pub const MOMENT_OF_FORCE: Dimension = Dimension::si([2, 1, -2, 0, 0, 0, 0]);
pub const PERMITTIVITY: Dimension = Dimension::si([-3, -1, 4, 2, 0, 0, 0]);
pub const POWER: Dimension = Dimension::si([2, 1, -3, 0, 0, 0, 0]);
pub const PRESSURE: Dimension = Dimension::si([-1, 1, -2, 0, 0, 0, 0]);
pub const RADIANCE: Dimension = Dimension::si([0, 1, -3, 0, 0, 0, 0]);
pub const RADIANT_INTENSITY: Dimension = Dimension::si([2, 1, -3, 0, 0, 0, 0]);
pub const SPEED: Dimension = Dimension::si([1, 0, -1, 0, 0, 0, 0]);
pub const SPECIFIC_ENERGY: Dimension = Dimension::si([2, 0, -2, 0, 0, 0, 0]);
pub const SPECIFIC_HEAT_CAPACITY: Dimension = Dimension::si([2, 0, -2, 0, -1, 0, 0]);
pub const SPECIFIC_VOLUME: Dimension = Dimension::si([3, -1, 0, 0, 0, 0, 0]);
pub const SUBSTANCE_PERMEABILITY: Dimension = Dimension::si([-1, 0, 1, 0, 0, 0, 0]);
pub const SURFACE_TENSION: Dimension = Dimension::si([0, 1, -2, 0, 0, 0, 0]);
pub const THERMAL_CONDUCTIVITY: Dimension = Dimension::si([1, 1, -3, 0, -1, 0, 0]);
pub const THERMAL_DIFFUSIVITY: Dimension = Dimension::si([2, 0, -1, 0, 0, 0, 0]);
pub const THERMAL_INSULANCE: Dimension = Dimension::si([0, -1, 3, 0, 1, 0, 0]);
pub const THERMAL_RESISTANCE: Dimension = Dimension::si([-2, -1, 3, 0, 1, 0, 0]);
pub const THERMAL_RESISTIVITY: Dimension = Dimension::si([-1, -1, 3, 0, 1, 0, 0]);
pub const TORQUE: Dimension = Dimension::si([2, 1, -2, 0, 0, 0, 0]);
pub const VOLUME: Dimension = Dimension::si([3, 0, 0, 0, 0, 0, 0]);
pub const VOLUME_FLOW_RATE: Dimension = Dimension::si([3, 0, -1, 0, 0, 0, 0]);
pub const WAVE_NUMBER: Dimension = Dimension::si([-1, 0, 0, 0, 0, 0, 0]);
