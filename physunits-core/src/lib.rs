//! PhysUnits Core - Fundamental types
//!
//! This crate provides the core types used throughout PhysUnits:
//! - `Dimension`: exponent vector over 7 SI base and 10 extension dimensions
//! - `Quantity`: a floating-point magnitude with a dimension
//! - `QuantityError`: every error the library can produce

pub mod dimension;
mod error;
pub mod functions;
pub mod numfmt;
mod quantity;
pub mod symbol;

pub use dimension::{Dimension, BASE_COUNT, DIMENSION_COUNT, EXTENSION_COUNT};
pub use error::{ParserError, QuantityError, codes};
pub use quantity::{Operator, Quantity};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Dimension, Operator, ParserError, Quantity, QuantityError};
    pub use crate::error::codes;
    pub use crate::functions::*;
}
