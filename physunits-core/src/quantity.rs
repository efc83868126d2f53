//! Quantity type - a magnitude with an associated dimension

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, DivAssign, Mul, MulAssign, Neg};
use serde::{Serialize, Deserialize};
use crate::{numfmt, symbol, Dimension, QuantityError};

/// Dimension-checked operators, named as they appear in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Assign,
    AddAssign,
    Add,
    SubAssign,
    Sub,
    Eq,
    Ne,
    Le,
    Ge,
    Lt,
    Gt,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Assign => "operator=",
            Operator::AddAssign => "operator+=",
            Operator::Add => "operator+",
            Operator::SubAssign => "operator-=",
            Operator::Sub => "operator-",
            Operator::Eq => "operator==",
            Operator::Ne => "operator!=",
            Operator::Le => "operator<=",
            Operator::Ge => "operator>=",
            Operator::Lt => "operator<",
            Operator::Gt => "operator>",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical quantity: a floating-point magnitude and its dimension.
///
/// Addition, subtraction, comparison and assignment require equal
/// dimensions and are only available as `checked_*` methods; the
/// scale-only operators (`*`, `/`, unary `-`) are plain `std::ops` impls.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Quantity {
    dimension: Dimension,
    value: f64,
}

impl Quantity {
    /// Create a new quantity
    pub const fn new(dimension: Dimension, value: f64) -> Self {
        Quantity { dimension, value }
    }

    /// Magnitude 1 in the given dimension
    pub const fn unit(dimension: Dimension) -> Self {
        Quantity::new(dimension, 1.0)
    }

    /// Create a dimensionless quantity (pure number)
    pub const fn number(value: f64) -> Self {
        Quantity::new(Dimension::DIMENSIONLESS, value)
    }

    /// The magnitude, in SI base units
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the dimension of this quantity
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Check if two quantities have the same dimension
    pub fn same_dimension(&self, other: &Quantity) -> bool {
        self.dimension == other.dimension
    }

    /// Zero in the same dimension
    pub fn zero(&self) -> Quantity {
        Quantity::new(self.dimension, 0.0)
    }

    fn check_dimension(&self, other: &Quantity, operator: Operator) -> Result<(), QuantityError> {
        if self.same_dimension(other) {
            Ok(())
        } else {
            Err(QuantityError::incompatible(operator, self.dimension, other.dimension))
        }
    }

    /// Replace this quantity with `other`, which must have the same dimension
    pub fn checked_assign(&mut self, other: Quantity) -> Result<(), QuantityError> {
        self.check_dimension(&other, Operator::Assign)?;
        self.value = other.value;
        Ok(())
    }

    pub fn checked_add(&self, other: &Quantity) -> Result<Quantity, QuantityError> {
        self.check_dimension(other, Operator::Add)?;
        Ok(Quantity::new(self.dimension, self.value + other.value))
    }

    pub fn checked_sub(&self, other: &Quantity) -> Result<Quantity, QuantityError> {
        self.check_dimension(other, Operator::Sub)?;
        Ok(Quantity::new(self.dimension, self.value - other.value))
    }

    pub fn checked_add_assign(&mut self, other: &Quantity) -> Result<(), QuantityError> {
        self.check_dimension(other, Operator::AddAssign)?;
        self.value += other.value;
        Ok(())
    }

    pub fn checked_sub_assign(&mut self, other: &Quantity) -> Result<(), QuantityError> {
        self.check_dimension(other, Operator::SubAssign)?;
        self.value -= other.value;
        Ok(())
    }

    pub fn checked_eq(&self, other: &Quantity) -> Result<bool, QuantityError> {
        self.check_dimension(other, Operator::Eq)?;
        Ok(self.value == other.value)
    }

    pub fn checked_ne(&self, other: &Quantity) -> Result<bool, QuantityError> {
        self.check_dimension(other, Operator::Ne)?;
        Ok(self.value != other.value)
    }

    pub fn checked_lt(&self, other: &Quantity) -> Result<bool, QuantityError> {
        self.check_dimension(other, Operator::Lt)?;
        Ok(self.value < other.value)
    }

    pub fn checked_le(&self, other: &Quantity) -> Result<bool, QuantityError> {
        self.check_dimension(other, Operator::Le)?;
        Ok(self.value <= other.value)
    }

    pub fn checked_gt(&self, other: &Quantity) -> Result<bool, QuantityError> {
        self.check_dimension(other, Operator::Gt)?;
        Ok(self.value > other.value)
    }

    pub fn checked_ge(&self, other: &Quantity) -> Result<bool, QuantityError> {
        self.check_dimension(other, Operator::Ge)?;
        Ok(self.value >= other.value)
    }

    /// Ordering of two quantities; `None` for different dimensions or NaN
    pub fn checked_cmp(&self, other: &Quantity) -> Option<Ordering> {
        if self.same_dimension(other) {
            self.value.partial_cmp(&other.value)
        } else {
            None
        }
    }

    /// Absolute value
    pub fn abs(&self) -> Quantity {
        Quantity::new(self.dimension, self.value.abs())
    }

    /// Raise to an integer power
    pub fn powi(&self, n: i32) -> Quantity {
        Quantity::new(self.dimension.power(n), self.value.powi(n))
    }

    /// Product that fails instead of overflowing a dimension exponent
    pub fn checked_mul(&self, other: &Quantity) -> Result<Quantity, QuantityError> {
        let dimension = self.dimension.checked_product(&other.dimension)?;
        Ok(Quantity::new(dimension, self.value * other.value))
    }

    /// Quotient that fails instead of overflowing a dimension exponent
    pub fn checked_div(&self, other: &Quantity) -> Result<Quantity, QuantityError> {
        let dimension = self.dimension.checked_quotient(&other.dimension)?;
        Ok(Quantity::new(dimension, self.value / other.value))
    }

    /// Integer power that fails instead of overflowing a dimension exponent
    pub fn checked_powi(&self, n: i32) -> Result<Quantity, QuantityError> {
        let dimension = self.dimension.checked_power(n)?;
        Ok(Quantity::new(dimension, self.value.powi(n)))
    }

    /// Integer root; the dimension must be an exact multiple of `n`
    pub fn root(&self, n: i32) -> Result<Quantity, QuantityError> {
        let dimension = self.dimension.root(n)?;
        Ok(Quantity::new(dimension, self.value.powf(1.0 / f64::from(n))))
    }

    /// Square root; every dimension exponent must be even
    pub fn sqrt(&self) -> Result<Quantity, QuantityError> {
        let dimension = self.dimension.root(2)?;
        Ok(Quantity::new(dimension, self.value.sqrt()))
    }
}

impl Mul for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity::new(self.dimension.product(&rhs.dimension), self.value * rhs.value)
    }
}

impl Div for Quantity {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::new(self.dimension.quotient(&rhs.dimension), self.value / rhs.value)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.dimension, self.value * rhs)
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity::new(rhs.dimension, self * rhs.value)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        Quantity::new(self.dimension, self.value / rhs)
    }
}

impl Div<Quantity> for f64 {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::new(rhs.dimension.reciprocal(), self / rhs.value)
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::new(self.dimension, -self.value)
    }
}

impl MulAssign for Quantity {
    fn mul_assign(&mut self, rhs: Quantity) {
        self.dimension *= rhs.dimension;
        self.value *= rhs.value;
    }
}

impl DivAssign for Quantity {
    fn div_assign(&mut self, rhs: Quantity) {
        self.dimension /= rhs.dimension;
        self.value /= rhs.value;
    }
}

impl MulAssign<f64> for Quantity {
    fn mul_assign(&mut self, rhs: f64) {
        self.value *= rhs;
    }
}

impl DivAssign<f64> for Quantity {
    fn div_assign(&mut self, rhs: f64) {
        self.value /= rhs;
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::number(value)
    }
}

/// Magnitude followed by the base-unit symbols, e.g. `9.81 m s-2`
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = numfmt::format_general(self.value, 6);
        let symbols = symbol::base_symbols(&self.dimension);
        if symbols.is_empty() {
            write!(f, "{}", magnitude)
        } else {
            write!(f, "{} {}", magnitude, symbols)
        }
    }
}
