//! Rendering of dimensions as unit-symbol terms ("m kg s-2")

use std::ops::Range;
use crate::dimension::{Dimension, BASE_COUNT, DIMENSION_COUNT};

/// Symbols of the SI base units, in dimension order
pub const BASE_SYMBOLS: [&str; BASE_COUNT] = ["m", "kg", "s", "A", "K", "mol", "cd"];

/// Default symbol for a slot: the SI base unit, or `x0`..`x9` for extensions
pub fn default_symbol(index: usize) -> String {
    match BASE_SYMBOLS.get(index) {
        Some(symbol) => symbol.to_string(),
        None => format!("x{}", index - BASE_COUNT),
    }
}

/// A single term: bare symbol for exponent 1, `m+2` for positive, `s-1` for negative
pub fn term(symbol: &str, exponent: i32) -> String {
    match exponent {
        1 => symbol.to_string(),
        e if e > 1 => format!("{}+{}", symbol, e),
        e => format!("{}{}", symbol, e),
    }
}

/// Terms for the non-zero slots in `range`, labelled by `label`
pub fn terms<F>(dimension: &Dimension, range: Range<usize>, mut label: F) -> Vec<String>
where
    F: FnMut(usize) -> String,
{
    let end = range.end.min(DIMENSION_COUNT);
    (range.start..end)
        .filter_map(|i| {
            let exponent = dimension.exponent(i);
            (exponent != 0).then(|| term(&label(i), exponent))
        })
        .collect()
}

/// All non-zero slots with their default symbols, space separated
pub fn base_symbols(dimension: &Dimension) -> String {
    terms(dimension, 0..DIMENSION_COUNT, default_symbol).join(" ")
}
