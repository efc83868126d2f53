//! Text and JSON rendering of parse results

use serde::Serialize;
use physunits::{Dimension, EngFormat, ParserError, Quantity, QuantityError, Registry, DEFAULT_DIGITS};

/// Micro glyph for terminal output
pub const MICRO: &str = "u";

/// "'<expr>': <eng> [<base symbols>]"
pub fn report_line(expression: &str, q: &Quantity, registry: &Registry) -> String {
    format!(
        "'{}': {} [{}]",
        expression,
        eng(q, registry).repr(),
        registry.base_unit_symbols(&q.dimension())
    )
}

/// Input text, caret under the failing column, then the message
pub fn error_lines(err: &QuantityError) -> String {
    match err {
        QuantityError::Parser(e) => format!("{}\n{}\nError: {}", e.text, e.caret_line(), e.message),
        other => format!("Error: {}", other),
    }
}

fn eng(q: &Quantity, registry: &Registry) -> EngFormat {
    EngFormat::new(q, DEFAULT_DIGITS, false, registry).with_micro(MICRO)
}

/// Machine-readable result for one expression
#[derive(Debug, Serialize)]
pub struct Report {
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerical_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eng: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_symbols: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl Report {
    pub fn success(expression: &str, q: &Quantity, numerical_value: f64, registry: &Registry) -> Self {
        Self {
            expression: expression.to_string(),
            value: Some(q.value()),
            dimension: Some(q.dimension()),
            numerical_value: Some(numerical_value),
            eng: Some(eng(q, registry).repr()),
            base_symbols: Some(registry.base_unit_symbols(&q.dimension())),
            error: None,
        }
    }

    pub fn failure(expression: &str, err: &QuantityError) -> Self {
        let position = match err {
            QuantityError::Parser(ParserError { position, .. }) => Some(*position),
            _ => None,
        };
        Self {
            expression: expression.to_string(),
            value: None,
            dimension: None,
            numerical_value: None,
            eng: None,
            base_symbols: None,
            error: Some(ErrorReport {
                kind: err.kind(),
                message: err.to_string(),
                position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physunits::{codes, QuantityParser};

    fn parse(registry: &mut Registry, text: &str) -> Result<Quantity, QuantityError> {
        QuantityParser::new(registry).parse(text)
    }

    #[test]
    fn test_report_line() {
        let mut reg = Registry::new();
        let q = parse(&mut reg, "330 m/s").unwrap();
        assert_eq!(report_line("330 m/s", &q, &reg), "'330 m/s': 330 m/s [m s-1]");
        let q = parse(&mut reg, "2.2 kOhm").unwrap();
        assert_eq!(report_line("2.2 kOhm", &q, &reg), "'2.2 kOhm': 2.2 kOhm [m+2 kg s-3 A-2]");
        let q = parse(&mut reg, "3 us").unwrap();
        assert_eq!(report_line("3 us", &q, &reg), "'3 us': 3 us [s]");
    }

    #[test]
    fn test_error_lines() {
        let mut reg = Registry::new();
        let err = parse(&mut reg, "m/s/s").unwrap_err();
        assert_eq!(
            error_lines(&err),
            "m/s/s\n   ^\nError: quantity: parsing unit 'm/s/s': repetition of solidus \
             at position 4: use parenthesis to avoid ambiguity"
        );
    }

    #[test]
    fn test_json_report() {
        let mut reg = Registry::new();
        let mut parser = QuantityParser::new(&mut reg);
        let q = parser.parse("45 km/h").unwrap();
        let num = parser.numerical_value();
        let report = Report::success("45 km/h", &q, num, &reg);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["expression"], "45 km/h");
        assert_eq!(json["numerical_value"], 45.0);
        assert_eq!(json["eng"], "12.5 m/s");
        assert_eq!(json["base_symbols"], "m s-1");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_json_failure() {
        let mut reg = Registry::new();
        let err = parse(&mut reg, "(3 m").unwrap_err();
        let json = serde_json::to_value(Report::failure("(3 m", &err)).unwrap();
        assert_eq!(json["error"]["kind"], codes::PARSE_ERROR);
        assert_eq!(json["error"]["position"], 5);
        assert!(json.get("value").is_none());
    }
}
