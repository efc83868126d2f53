//! Plain quantity text, "<magnitude> <symbol>"

use physunits_core::numfmt::format_general;
use physunits_core::Quantity;
use physunits_units::Registry;

/// Significant digits of the default magnitude rendering
pub const DEFAULT_PRECISION: usize = 6;

/// A real value the way a default-configured C stream prints it: "3600", "1.5e-07"
pub fn value_to_string(value: f64) -> String {
    format_general(value, DEFAULT_PRECISION)
}

/// "<magnitude> <symbol>", the symbol using registered names when `prefer_name` is set.
///
/// The separating space is always written, also for dimensionless quantities.
pub fn to_string(q: &Quantity, prefer_name: bool, registry: &Registry) -> String {
    format!(
        "{} {}",
        value_to_string(q.value()),
        registry.unit_symbol(&q.dimension(), prefer_name)
    )
}

/// Fixed-point magnitude with `precision` decimals, followed by the symbol
/// unless the quantity is dimensionless.
pub fn format_fixed(q: &Quantity, precision: usize, prefer_name: bool, registry: &Registry) -> String {
    let magnitude = format!("{:.*}", precision, q.value());
    if q.is_dimensionless() {
        return magnitude;
    }
    format!("{} {}", magnitude, registry.unit_symbol(&q.dimension(), prefer_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use physunits_units::si::{hour, kilogram, meter, newton, number, second};

    #[test]
    fn test_to_string_prefers_names() {
        let reg = Registry::new();
        assert_eq!(to_string(&(2.0 * newton()), true, &reg), "2 N");
        assert_eq!(to_string(&(2.0 * newton()), false, &reg), "2 m kg s-2");
        assert_eq!(to_string(&(meter() / second()), true, &reg), "1 m/s");
        assert_eq!(to_string(&hour(), true, &reg), "3600 s");
    }

    #[test]
    fn test_to_string_general_notation() {
        let reg = Registry::new();
        assert_eq!(to_string(&(1.5e-7 * meter()), true, &reg), "1.5e-07 m");
        assert_eq!(to_string(&(1234567.0 * kilogram()), true, &reg), "1.23457e+06 kg");
        assert_eq!(to_string(&(42.0 * number()), true, &reg), "42 ");
    }

    #[test]
    fn test_format_fixed() {
        let reg = Registry::new();
        assert_eq!(format_fixed(&(9.8 * newton()), 3, false, &reg), "9.800 m kg s-2");
        assert_eq!(format_fixed(&(9.8 * newton()), 1, true, &reg), "9.8 N");
        assert_eq!(format_fixed(&(0.25 * number()), 2, true, &reg), "0.25");
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(0.0), "0");
        assert_eq!(value_to_string(12.5), "12.5");
        assert_eq!(value_to_string(1.0 / 3.0), "0.333333");
    }
}
