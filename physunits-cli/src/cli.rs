//! Command line arguments

use clap::Parser;
use physunits::ParserOptions;

pub const EXAMPLES: &str = "\
Examples:
  physunits \"42 km\" \"1 dm3\" \"2 (3.14 mm)2\"
  physunits \"330 m/s\" \"9.8 m/s2\" \"9.8 m.s-2\" \"9.8 m s-2\"
  physunits \"3 kHz\" \"3 1/s\" \"3 kV.A\" \"2.2 kOhm\"
  physunits --extend \"3 Foo\" \"4 !foo\" \"ffoo\" \"f!foo\" \"J2/ffoo\"

Syntax (EBNF):
     expression = [magnitude] factor { (\" \"|\".\"|\"/\") factor } .
         factor = prefixed-unit [power]
                | \"(\" expression \")\" [power] .
  prefixed-unit = [prefix] unit
      magnitude = floating-point-number
          power = signed-integral-number
         prefix = \"y\"..\"Y\"
           unit = [\"!\"] (\"m\"|\"kg\"|\"s\"|\"A\"|\"K\"|\"mol\"|\"cd\"...)
                | \"1\"

Note 1: \"!\" is the default escape character for newly defined units.
Note 2: \"1\" is used for reciprocal units; it must be followed by \"/\".
Option --escape implies option --extend.";

/// Parse unit expressions and show each quantity in engineering notation
/// and in the seven SI base units.
#[derive(Parser, Debug)]
#[command(name = "physunits", version, after_help = EXAMPLES)]
pub struct Args {
    /// Accept dimensionless quantities
    #[arg(short, long = "dimless", visible_alias = "dimensionless")]
    pub dimless: bool,

    /// Escape character for extended units
    #[arg(short, long, value_name = "C")]
    pub escape: Option<char>,

    /// Define units when first encountered
    #[arg(short = 'x', long)]
    pub extend: bool,

    /// Report the parser trace
    #[arg(long)]
    pub debug: bool,

    /// One JSON object per expression
    #[arg(long)]
    pub json: bool,

    /// Unit expressions; "-" reads expressions from standard input
    #[arg(value_name = "EXPRESSION")]
    pub expressions: Vec<String>,
}

impl Args {
    pub fn parser_options(&self) -> ParserOptions {
        let defaults = ParserOptions::default();
        ParserOptions {
            debug: self.debug,
            extend: self.extend || self.escape.is_some(),
            dimensionless: self.dimless,
            escape: self.escape.unwrap_or(defaults.escape),
        }
    }
}
