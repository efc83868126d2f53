//! Free functions over quantities

use num_traits::NumCast;
use crate::{Dimension, Quantity, QuantityError};

/// Absolute value
pub fn abs(q: Quantity) -> Quantity {
    q.abs()
}

pub fn square(q: Quantity) -> Quantity {
    q.powi(2)
}

pub fn cube(q: Quantity) -> Quantity {
    q.powi(3)
}

/// Raise to the integer power `n`
pub fn nth_power(q: Quantity, n: i32) -> Quantity {
    q.powi(n)
}

/// Take the `n`-th root; every dimension exponent must be a multiple of `n`
pub fn nth_root(q: Quantity, n: i32) -> Result<Quantity, QuantityError> {
    q.root(n)
}

pub fn sqrt(q: Quantity) -> Result<Quantity, QuantityError> {
    q.sqrt()
}

/// The magnitude of a dimensionless quantity as `T`.
///
/// Fails with [`QuantityError::BadCast`] when the quantity has a dimension
/// or its magnitude does not fit in `T`.
pub fn quantity_cast<T: NumCast>(q: Quantity) -> Result<T, QuantityError> {
    let type_name = std::any::type_name::<T>();
    if !q.is_dimensionless() {
        return Err(QuantityError::not_dimensionless(type_name));
    }
    T::from(q.value()).ok_or_else(|| QuantityError::not_representable(type_name))
}

pub fn to_real(q: Quantity) -> Result<f64, QuantityError> {
    quantity_cast(q)
}

/// Magnitude truncated toward zero
pub fn to_integer(q: Quantity) -> Result<i64, QuantityError> {
    quantity_cast(q)
}

/// The raw magnitude, whatever the dimension
pub fn magnitude(q: Quantity) -> f64 {
    q.value()
}

pub fn dimension(q: Quantity) -> Dimension {
    q.dimension()
}
