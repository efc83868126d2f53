//! Unit-expression parser
//!
//! Parses "1 m", "1.2km", "330m/s", "9.8m/s2", "3 kV.A", "3.2 kOhm" and
//! "2 (3 m)" into a [`Quantity`]. Grammar:
//!
//! ```text
//! nv-expression = [numerical-value] term
//! expression    = [value] term
//! term          = factor { (" " | "." | "/") factor }
//! factor        = prefixed-unit [power] | "(" expression ")" [power]
//! prefixed-unit = [prefix] unit
//! unit          = [escape] unit-name | "1"     ("1" only before "/")
//! power         = signed integer
//! ```
//!
//! A leading `e` or `E` is read as part of the numerical value, so a unit
//! with such a name needs a number or the escape in front: "1 egg", "!egg".

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use physunits_core::{ParserError, Quantity, QuantityError};
use physunits_units::{has_prefix, prefix, Registry};

/// Never part of valid input; returned for positions past the end
const END: char = '\0';

/// Characters removed from both ends of the input
const STRIP_SET: [char; 3] = [' ', '\t', '\n'];

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Collect and log a trace of the grammar rules visited
    pub debug: bool,
    /// Define unknown unit names as extension units
    pub extend: bool,
    /// Accept plain numbers without a unit
    pub dimensionless: bool,
    /// Character that forces the following name to be read as a whole unit
    pub escape: char,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            debug: false,
            extend: false,
            dimensionless: false,
            escape: '!',
        }
    }
}

/// Recursive-descent parser over a borrowed registry.
///
/// The registry is mutable because parsing with `extend` set may define
/// new extension units.
pub struct QuantityParser<'r> {
    registry: &'r mut Registry,
    options: ParserOptions,
    chars: Vec<char>,
    index: usize,
    text: String,
    num_value: f64,
    pfx_factor: f64,
    trace: String,
}

impl<'r> QuantityParser<'r> {
    pub fn new(registry: &'r mut Registry) -> Self {
        Self {
            registry,
            options: ParserOptions::default(),
            chars: Vec::new(),
            index: 0,
            text: String::new(),
            num_value: 1.0,
            pfx_factor: 1.0,
            trace: String::new(),
        }
    }

    pub fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn debug(mut self, on: bool) -> Self {
        self.options.debug = on;
        self
    }

    pub fn extend(mut self, on: bool) -> Self {
        self.options.extend = on;
        self
    }

    pub fn dimensionless(mut self, on: bool) -> Self {
        self.options.dimensionless = on;
        self
    }

    /// Set the unit escape character, e.g. `'!'` so that `!foo` is unit foo, not femto-oo
    pub fn escape(mut self, chr: char) -> Self {
        self.options.escape = chr;
        self
    }

    /// The numerical value of the last parse: the 45 in "45 km/h"
    pub fn numerical_value(&self) -> f64 {
        self.num_value
    }

    /// The unit part of the last parse: 1000/3600 for "45 km/h"
    pub fn prefix_factor(&self) -> f64 {
        self.pfx_factor
    }

    /// The stripped input text
    pub fn input_text(&self) -> &str {
        &self.text
    }

    /// 1-based scan position
    pub fn input_position(&self) -> usize {
        self.index + 1
    }

    /// Trace of all parses so far
    pub fn debug_text(&self) -> &str {
        &self.trace
    }

    /// Parse `text` into a quantity
    pub fn parse(&mut self, text: &str) -> Result<Quantity, QuantityError> {
        let trace_start = self.trace.len();
        let result: Result<Quantity, QuantityError> = self.parse_input(text).map_err(|err| {
            ParserError::new(
                format!("quantity: parsing unit '{}': {}", text, err),
                self.text.clone(),
                self.input_position(),
            )
            .into()
        });

        if self.options.debug {
            debug!(input = text, "parse trace:\n{}", &self.trace[trace_start..]);
        }
        result
    }

    fn parse_input(&mut self, text: &str) -> Result<Quantity, QuantityError> {
        self.log(format!("parse(): '{}'", text));

        self.text = text.trim_matches(STRIP_SET.as_slice()).to_string();
        self.chars = self.text.chars().collect();
        self.index = 0;

        let q = self.parse_nv_expression()?;

        if !self.at_end() {
            return Err(self.syntax(format!(
                "garbage at position {}: '{}'",
                self.input_position(),
                self.current()
            )));
        }

        self.pfx_factor = (q / self.num_value).value();
        Ok(q)
    }

    /// nv-expression = [numerical-value] term
    fn parse_nv_expression(&mut self) -> Result<Quantity, QuantityError> {
        self.log(format!("nv_expression(): '{}'", self.current()));

        self.num_value = self.parse_numerical_value()?;
        let term = self.parse_term()?;
        Ok(self.num_value * term)
    }

    /// expression = [value] term
    fn parse_expression(&mut self) -> Result<Quantity, QuantityError> {
        self.log(format!("expression(): '{}'", self.current()));

        let value = self.parse_numerical_value()?;
        let term = self.parse_term()?;
        Ok(value * term)
    }

    fn parse_numerical_value(&mut self) -> Result<f64, QuantityError> {
        self.log(format!("numerical_value(): '{}'", self.current()));

        self.skip_whitespace();

        let mut value = 1.0;
        if is_real(self.current()) {
            let start = self.input_position();
            let literal = self.scan_while(is_real);
            value = literal.parse::<f64>().map_err(|_| {
                self.syntax(format!(
                    "invalid numerical value at position {}: '{}'",
                    start, literal
                ))
            })?;
        }

        self.skip_whitespace();

        self.log(format!("numerical_value(): magnitude: {}", value));
        Ok(value)
    }

    /// term = factor { (" " | "." | "/") factor }
    fn parse_term(&mut self) -> Result<Quantity, QuantityError> {
        let mut lhs = self.parse_factor()?;
        let mut solidus_count = 0;

        while is_operator(self.current()) {
            if is_operator(self.ahead()) {
                return Err(self.syntax(format!(
                    "consecutive operators at position {}: '{}' and '{}'",
                    self.input_position(),
                    self.current(),
                    self.ahead()
                )));
            }

            self.log(format!("term(): '{}'", self.current()));

            if self.current() == '/' {
                solidus_count += 1;
                if solidus_count > 1 {
                    return Err(self.syntax(format!(
                        "repetition of solidus at position {}: use parenthesis to avoid ambiguity",
                        self.input_position()
                    )));
                }
                self.advance();
                let rhs = self.parse_factor()?;
                lhs = lhs.checked_div(&rhs)?;
            } else {
                solidus_count = 0;
                self.advance();
                let rhs = self.parse_factor()?;
                lhs = lhs.checked_mul(&rhs)?;
            }
        }

        Ok(lhs)
    }

    /// factor = prefixed-unit [power] | "(" expression ")" [power]
    fn parse_factor(&mut self) -> Result<Quantity, QuantityError> {
        self.log(format!("factor(): '{}'", self.current()));

        if self.accept('(') {
            let q = self.parse_expression()?;
            self.expect(')')?;
            return self.parse_power(q);
        }

        if self.options.dimensionless && !self.is_prefixed_unit(self.current(), self.ahead()) {
            return Ok(Quantity::number(1.0));
        }

        let factor = self.parse_prefix()?;
        let unit = self.parse_unit()?;
        self.parse_power(factor * unit)
    }

    /// Prefix variations:
    ///   m     no prefix
    ///   km    normal prefix
    ///   kfoo  normal prefix
    ///   !foo  escape: no prefix, whole name is the unit
    ///   k!foo redundant escape after a prefix
    fn parse_prefix(&mut self) -> Result<f64, QuantityError> {
        let (cur, next) = (self.current(), self.ahead());
        self.log(format!("prefix(): current: '{}', ahead: '{}'", cur, next));

        if self.is_escape(cur) || !self.is_unit_start(next) {
            return Ok(1.0);
        }

        // unit names that start with a prefix letter
        if matches!(
            (cur, next),
            ('c', 'd') | ('k', 'g') | ('m', 'o') | ('m', 'i') | ('P', 'a') | ('G', 'y')
        ) {
            return Ok(1.0);
        }

        let code = if (cur, next) == ('d', 'a') {
            self.advance();
            "da".to_string()
        } else if has_prefix(&cur.to_string()) {
            cur.to_string()
        } else {
            return Ok(1.0);
        };

        self.advance();
        prefix(&code)
    }

    /// unit = [escape] unit-name | "1" followed by "/"
    fn parse_unit(&mut self) -> Result<Quantity, QuantityError> {
        self.log(format!("unit(): '{}'", self.current()));

        if self.current() == '1' {
            if self.ahead() != '/' {
                let got = if self.ahead_at_end() {
                    "[nothing]".to_string()
                } else {
                    self.ahead().to_string()
                };
                return Err(self.syntax(format!(
                    "expecting 1/u construct at position {}, got: '1{}'",
                    self.input_position(),
                    got
                )));
            }
            self.advance();
            return Ok(Quantity::number(1.0));
        }

        if !self.is_unit(self.current(), self.ahead()) {
            let got = if self.at_end() {
                "[nothing]".to_string()
            } else {
                self.current().to_string()
            };
            return Err(self.syntax(format!(
                "expecting unit at position {}, got: '{}'",
                self.input_position(),
                got
            )));
        }

        let name = self.scan_unit();
        self.registry.unit(&name, self.options.extend)
    }

    /// power = signed integer; the resulting exponents must fit an i32
    fn parse_power(&mut self, q: Quantity) -> Result<Quantity, QuantityError> {
        self.log(format!("power(): '{}'", self.current()));

        if !is_integer(self.current()) {
            return Ok(q);
        }

        let start = self.input_position();
        let literal = self.scan_while(is_integer);
        let n = literal.parse::<i32>().map_err(|_| {
            self.syntax(format!("invalid power at position {}: '{}'", start, literal))
        })?;
        q.checked_powi(n)
    }

    fn scan_unit(&mut self) -> String {
        let escape = self.options.escape;
        self.accept(escape);

        // the apostrophe allows degree Celsius, 'C
        let name = self.scan_while(|c| c == '\'' || c.is_ascii_alphabetic());
        self.log(format!("scan_unit(): '{}'", name));
        name
    }

    fn scan_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while !self.at_end() && pred(self.current()) {
            text.push(self.current());
            self.advance();
        }
        text
    }

    fn skip_whitespace(&mut self) {
        while is_space(self.current()) {
            self.advance();
        }
    }

    fn is_escape(&self, x: char) -> bool {
        x == self.options.escape
    }

    /// Could `x` start a unit following a prefix
    fn is_unit_start(&self, x: char) -> bool {
        self.is_escape(x) || x.is_ascii_alphabetic()
    }

    fn is_unit(&self, x: char, y: char) -> bool {
        x.is_ascii_alphabetic() || (self.is_escape(x) && y.is_ascii_alphabetic()) || (x == '\'' && y == 'C')
    }

    fn is_prefixed_unit(&self, x: char, y: char) -> bool {
        x == '1' || self.is_unit(x, y)
    }

    fn at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn ahead_at_end(&self) -> bool {
        self.index + 1 >= self.chars.len()
    }

    fn current(&self) -> char {
        self.chars.get(self.index).copied().unwrap_or(END)
    }

    fn ahead(&self) -> char {
        self.chars.get(self.index + 1).copied().unwrap_or(END)
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.index += 1;
        }
    }

    fn accept(&mut self, chr: char) -> bool {
        if self.at_end() || self.current() != chr {
            return false;
        }
        self.advance();
        true
    }

    fn expect(&mut self, chr: char) -> Result<(), QuantityError> {
        if !self.accept(chr) {
            return Err(self.syntax(format!("quantity: expecting '{}'", chr)));
        }
        Ok(())
    }

    fn syntax(&self, message: String) -> QuantityError {
        ParserError::new(message, self.text.clone(), self.input_position()).into()
    }

    fn log(&mut self, line: String) {
        trace!("{}", line);
        self.trace.push_str(&line);
        self.trace.push('\n');
    }
}

fn is_space(x: char) -> bool {
    matches!(x, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn is_real(x: char) -> bool {
    x.is_ascii_digit() || matches!(x, '.' | 'e' | 'E' | '+' | '-')
}

fn is_integer(x: char) -> bool {
    x.is_ascii_digit() || matches!(x, '+' | '-')
}

fn is_operator(x: char) -> bool {
    matches!(x, ' ' | '.' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use physunits_core::Dimension;
    use physunits_core::dimension::{ACCELERATION, SPEED};
    use physunits_units::prefix::KILO;
    use physunits_units::si::{hour, meter, second};

    fn parse(text: &str) -> Result<Quantity, QuantityError> {
        let mut reg = Registry::new();
        QuantityParser::new(&mut reg).parse(text)
    }

    fn parse_error(text: &str) -> ParserError {
        match parse(text) {
            Err(QuantityError::Parser(err)) => err,
            other => panic!("expected parser error for '{}', got {:?}", text, other),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1.0)
    }

    #[test]
    fn test_simple_units() {
        let q = parse("1 m").unwrap();
        assert_eq!(q.dimension(), Dimension::LENGTH);
        assert_eq!(q.value(), 1.0);

        let q = parse("1.2km").unwrap();
        assert!(close(q.value(), 1200.0));

        let q = parse("330m/s").unwrap();
        assert_eq!(q.dimension(), SPEED);
        assert_eq!(q.value(), 330.0);

        let q = parse("9.8m/s2").unwrap();
        assert_eq!(q.dimension(), ACCELERATION);
        assert!(close(q.value(), 9.8));
    }

    #[test]
    fn test_numerical_value_and_prefix_factor() {
        let mut reg = Registry::new();
        let mut parser = QuantityParser::new(&mut reg);
        let q = parser.parse("45 km/h").unwrap();

        let expected = 45.0 * KILO * meter() / hour();
        assert!(q.same_dimension(&expected));
        assert!(close(q.value(), 12.5));
        assert!(close(q.value(), expected.value()));
        assert_eq!(parser.numerical_value(), 45.0);
        assert!(close(parser.prefix_factor(), 1000.0 / 3600.0));
    }

    #[test]
    fn test_parenthesized_expression() {
        let mut reg = Registry::new();
        let mut parser = QuantityParser::new(&mut reg);
        let q = parser.parse("2 (3 m)").unwrap();
        assert_eq!(q.value(), 6.0);
        assert_eq!(q.dimension(), Dimension::LENGTH);
        assert_eq!(parser.numerical_value(), 2.0);
        assert_eq!(parser.prefix_factor(), 3.0);
    }

    #[test]
    fn test_parenthesized_power() {
        let q = parse("(m/s)2").unwrap();
        assert_eq!(q.dimension(), SPEED.power(2));
        let q = parse("2 (3 m)2").unwrap();
        assert_eq!(q.value(), 18.0);
    }

    #[test]
    fn test_operators() {
        let a = parse("3 kV.A").unwrap();
        let b = parse("3 kV A").unwrap();
        assert!(a.checked_eq(&b).unwrap());
        assert!(close(a.value(), 3000.0));
        assert_eq!(parse("1 kg.m/s2").unwrap().dimension(), physunits_core::dimension::FORCE);
        // multiplication resets the solidus count
        assert_eq!(parse("1 m/s.kg/s").unwrap().dimension(), physunits_core::dimension::FORCE);
    }

    #[test]
    fn test_prefix_disambiguation() {
        assert_eq!(parse("1 mol").unwrap().dimension(), Dimension::AMOUNT);
        assert_eq!(parse("1 mmol").unwrap().value(), 1e-3);
        assert_eq!(parse("1 min").unwrap().value(), 60.0);
        assert_eq!(parse("1 cd").unwrap().dimension(), Dimension::LUMINOSITY);
        assert_eq!(parse("1 kg").unwrap().value(), 1.0);
        assert_eq!(parse("1 g").unwrap().value(), 1e-3);
        assert!(close(parse("1 mg").unwrap().value(), 1e-6));
        assert_eq!(parse("1 Pa").unwrap().value(), 1.0);
        assert_eq!(parse("1 kPa").unwrap().value(), 1e3);
        assert_eq!(parse("1 Gy").unwrap().value(), 1.0);
        assert_eq!(parse("1 dam").unwrap().value(), 10.0);
        assert_eq!(parse("1 dm").unwrap().value(), 0.1);
        assert_eq!(parse("1 h").unwrap().value(), 3600.0);
        assert_eq!(parse("1 um").unwrap().value(), 1e-6);
        assert!(close(parse("3.2 kOhm").unwrap().value(), 3200.0));
    }

    #[test]
    fn test_degree_celsius() {
        let q = parse("20 'C").unwrap();
        assert_eq!(q.dimension(), Dimension::TEMPERATURE);
        assert_eq!(q.value(), 20.0);
    }

    #[test]
    fn test_reciprocal_unit() {
        let q = parse("50 1/s").unwrap();
        assert_eq!(q.dimension(), Dimension::TIME.reciprocal());
        assert_eq!(q.value(), 50.0);
        // the leading number is consumed as the numerical value
        assert!(parse("1/s").is_err());
    }

    #[test]
    fn test_whitespace_is_stripped() {
        let mut reg = Registry::new();
        let mut parser = QuantityParser::new(&mut reg);
        let q = parser.parse(" \t5 m\n").unwrap();
        assert_eq!(q.value(), 5.0);
        assert_eq!(parser.input_text(), "5 m");
    }

    #[test]
    fn test_repeated_solidus() {
        let err = parse_error("m/s/s");
        assert_eq!(
            err.message,
            "quantity: parsing unit 'm/s/s': repetition of solidus at position 4: \
             use parenthesis to avoid ambiguity"
        );
        assert_eq!(err.text, "m/s/s");
        assert_eq!(err.position, 4);
        assert!(parse("m/(s s)").is_ok());
    }

    #[test]
    fn test_consecutive_operators() {
        let err = parse_error("m..m");
        assert_eq!(
            err.message,
            "quantity: parsing unit 'm..m': consecutive operators at position 2: '.' and '.'"
        );
        assert_eq!(err.caret_line(), " ^");
    }

    #[test]
    fn test_bare_one_needs_solidus() {
        let err = parse_error("7 1k");
        assert_eq!(
            err.message,
            "quantity: parsing unit '7 1k': expecting 1/u construct at position 3, got: '1k'"
        );
        let err = parse_error("7 1");
        assert!(err.message.ends_with("got: '1[nothing]'"), "{}", err.message);
    }

    #[test]
    fn test_unterminated_parenthesis() {
        let err = parse_error("(3 m");
        assert_eq!(err.message, "quantity: parsing unit '(3 m': quantity: expecting ')'");
        assert_eq!(err.position, 5);
    }

    #[test]
    fn test_garbage() {
        let err = parse_error("(m)a");
        assert_eq!(err.message, "quantity: parsing unit '(m)a': garbage at position 4: 'a'");
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_missing_unit() {
        let err = parse_error("3");
        assert_eq!(
            err.message,
            "quantity: parsing unit '3': expecting unit at position 2, got: '[nothing]'"
        );
        let err = parse_error("");
        assert!(err.message.contains("expecting unit at position 1"));
    }

    #[test]
    fn test_undefined_unit_is_wrapped() {
        let err = parse_error("xm");
        assert_eq!(
            err.message,
            "quantity: parsing unit 'xm': quantity: undefined unit 'xm'"
        );
        assert_eq!(err.position, 3);
    }

    #[test]
    fn test_invalid_literals() {
        let err = parse_error("1.2.3 m");
        assert!(err.message.contains("invalid numerical value at position 1: '1.2.3'"), "{}", err.message);
        let err = parse_error("1 m2-");
        assert!(err.message.contains("invalid power at position 4: '2-'"), "{}", err.message);
    }

    #[test]
    fn test_exponent_overflow_is_an_error() {
        let err = parse_error("(m2)2000000000");
        assert_eq!(
            err.message,
            "quantity: parsing unit '(m2)2000000000': quantity: dimension exponent overflow"
        );
        let err = parse_error("m2000000000 m2000000000");
        assert!(err.message.ends_with("dimension exponent overflow"), "{}", err.message);
        let err = parse_error("m-2000000000/m2000000000");
        assert!(err.message.ends_with("dimension exponent overflow"), "{}", err.message);
        assert_eq!(parse("(m2)3").unwrap().dimension(), Dimension::LENGTH.power(6));
    }

    #[test]
    fn test_leading_e_reads_as_number() {
        let mut reg = Registry::new();
        let mut parser = QuantityParser::new(&mut reg).extend(true);
        let err = match parser.parse("egg") {
            Err(QuantityError::Parser(e)) => e,
            other => panic!("expected parser error, got {:?}", other),
        };
        assert!(err.message.contains("invalid numerical value at position 1: 'e'"), "{}", err.message);
        assert_eq!(parser.parse("1 egg").unwrap().dimension(), Dimension::EXTRA[0]);
        assert_eq!(parser.parse("!egg").unwrap().dimension(), Dimension::EXTRA[0]);
    }

    #[test]
    fn test_embedded_sentinel_is_garbage() {
        let err = parse_error("1 m\0s");
        assert!(err.message.contains("garbage at position 4"), "{}", err.message);
    }

    #[test]
    fn test_dimensionless() {
        let mut reg = Registry::new();
        let mut parser = QuantityParser::new(&mut reg).dimensionless(true);
        let q = parser.parse("3").unwrap();
        assert!(q.is_dimensionless());
        assert_eq!(q.value(), 3.0);
        assert_eq!(parser.parse("3 m").unwrap().dimension(), Dimension::LENGTH);
    }

    #[test]
    fn test_extension_units() {
        let mut reg = Registry::new();
        {
            let mut parser = QuantityParser::new(&mut reg).extend(true);
            let q = parser.parse("5 !apple/s").unwrap();
            assert_eq!(q.dimension(), Dimension::EXTRA[0].quotient(&Dimension::TIME));
            // prefixed with redundant escape
            let q = parser.parse("2 k!apple").unwrap();
            assert_eq!(q.value(), 2000.0);
            assert_eq!(q.dimension(), Dimension::EXTRA[0]);
        }
        assert_eq!(reg.extension_count(), 1);
        // known now, also without extend
        let q = QuantityParser::new(&mut reg).parse("1 !apple").unwrap();
        assert_eq!(q.dimension(), Dimension::EXTRA[0]);
    }

    #[test]
    fn test_unescaped_name_reads_prefix() {
        let mut reg = Registry::new();
        let mut parser = QuantityParser::new(&mut reg).extend(true);
        let q = parser.parse("1 foo").unwrap();
        // femto + "oo"
        assert_eq!(q.value(), 1e-15);
        assert_eq!(reg.extensions()[0].name, "oo");
    }

    #[test]
    fn test_custom_escape() {
        let mut reg = Registry::new();
        let mut parser = QuantityParser::new(&mut reg).extend(true).escape('_');
        let q = parser.parse("1 _foo").unwrap();
        assert_eq!(q.value(), 1.0);
        assert_eq!(reg.extensions()[0].name, "foo");
    }

    #[test]
    fn test_debug_trace() {
        let mut reg = Registry::new();
        let mut parser = QuantityParser::new(&mut reg).debug(true);
        parser.parse("1 km").unwrap();
        let trace = parser.debug_text();
        assert!(trace.starts_with("parse(): '1 km'"));
        assert!(trace.contains("prefix(): current: 'k', ahead: 'm'"));
        assert!(trace.contains("scan_unit(): 'm'"));
    }

    #[test]
    fn test_options_serde() {
        let options: ParserOptions = serde_json::from_str(r#"{"extend": true}"#).unwrap();
        assert!(options.extend);
        assert!(!options.dimensionless);
        assert_eq!(options.escape, '!');
    }

    #[test]
    fn test_meter_per_second_matches_constructor() {
        let q = parse("1 m/s").unwrap();
        assert!(q.checked_eq(&(meter() / second())).unwrap());
    }
}
