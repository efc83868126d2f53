//! Structured errors for quantity operations
//!
//! Every failure in dimension algebra, unit lookup or parsing is a value
//! of [`QuantityError`]. Nothing in the library panics on bad input.

use crate::{Dimension, Operator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DIMENSION_ERROR: &str = "DIMENSION_ERROR";
    pub const INCOMPATIBLE_DIMENSION: &str = "INCOMPATIBLE_DIMENSION";
    pub const PREFIX_ERROR: &str = "PREFIX_ERROR";
    pub const UNIT_ERROR: &str = "UNIT_ERROR";
    pub const BAD_QUANTITY_CAST: &str = "BAD_QUANTITY_CAST";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
}

/// Error raised while parsing a unit expression.
///
/// `text` is the whitespace-stripped input and `position` the 1-based scan
/// position at which the parser gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ParserError {
    /// Full message, including the "quantity: parsing unit" prefix
    pub message: String,
    /// The stripped input text
    pub text: String,
    /// 1-based position of the offending character
    pub position: usize,
}

impl ParserError {
    pub fn new(message: impl Into<String>, text: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            text: text.into(),
            position,
        }
    }

    /// A line with a caret under the offending character of `text`
    pub fn caret_line(&self) -> String {
        format!("{}^", " ".repeat(self.position.saturating_sub(1)))
    }
}

/// All errors produced by this library
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum QuantityError {
    /// A dimension operation that cannot be carried out, e.g. an uneven root
    #[error("{0}")]
    Dimension(String),

    /// A dimension-checked operator applied to mismatched dimensions
    #[error(
        "quantity: incompatible dimension in {operator}: lhs:{}, rhs:{}",
        .lhs.exponents_string(),
        .rhs.exponents_string()
    )]
    IncompatibleDimension {
        operator: Operator,
        lhs: Dimension,
        rhs: Dimension,
    },

    /// Unknown prefix code
    #[error("{0}")]
    Prefix(String),

    /// Unknown unit, or no room left in the extension table
    #[error("{0}")]
    Unit(String),

    /// Numeric conversion of a quantity that is not a plain number
    #[error("{0}")]
    BadCast(String),

    #[error(transparent)]
    Parser(#[from] ParserError),
}

impl QuantityError {
    /// Machine-readable code for this error
    pub fn kind(&self) -> &'static str {
        match self {
            QuantityError::Dimension(_) => codes::DIMENSION_ERROR,
            QuantityError::IncompatibleDimension { .. } => codes::INCOMPATIBLE_DIMENSION,
            QuantityError::Prefix(_) => codes::PREFIX_ERROR,
            QuantityError::Unit(_) => codes::UNIT_ERROR,
            QuantityError::BadCast(_) => codes::BAD_QUANTITY_CAST,
            QuantityError::Parser(_) => codes::PARSE_ERROR,
        }
    }

    // ========== Common Error Constructors ==========

    pub fn not_even_multiple() -> Self {
        Self::Dimension("quantity: dimension should be even multiple".to_string())
    }

    pub fn exponent_overflow() -> Self {
        Self::Dimension("quantity: dimension exponent overflow".to_string())
    }

    pub fn incompatible(operator: Operator, lhs: Dimension, rhs: Dimension) -> Self {
        Self::IncompatibleDimension { operator, lhs, rhs }
    }

    pub fn unrecognized_prefix(code: &str) -> Self {
        Self::Prefix(format!("quantity: unrecognized prefix '{}'", code))
    }

    pub fn undefined_unit(name: &str) -> Self {
        Self::Unit(format!("quantity: undefined unit '{}'", name))
    }

    pub fn extension_table_full(name: &str) -> Self {
        Self::Unit(format!(
            "quantity: dimension extension table full, while trying to add '{}'",
            name
        ))
    }

    pub fn not_dimensionless(type_name: &str) -> Self {
        Self::BadCast(format!(
            "cast quantity to '{}': quantity must be dimensionless",
            type_name
        ))
    }

    pub fn not_representable(type_name: &str) -> Self {
        Self::BadCast(format!(
            "cast quantity to '{}': magnitude out of range",
            type_name
        ))
    }
}
