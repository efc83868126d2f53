//! PhysUnits command line
//!
//! Parses the unit expressions given as arguments, or read from standard
//! input with "-", and prints each quantity in engineering notation and in
//! SI base units. Unit definitions made with --extend persist across all
//! expressions of one run.

mod cli;
mod report;

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use physunits::{ParserOptions, QuantityParser, Registry};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cli::Args;
use report::{error_lines, report_line, Report};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Evaluates expressions against one registry and writes the results
struct Session {
    registry: Registry,
    options: ParserOptions,
    json: bool,
    failures: usize,
}

impl Session {
    fn new(options: ParserOptions, json: bool) -> Self {
        Self {
            registry: Registry::new(),
            options,
            json,
            failures: 0,
        }
    }

    fn evaluate(&mut self, expression: &str, out: &mut impl Write) -> io::Result<()> {
        let mut parser = QuantityParser::new(&mut self.registry).options(self.options);
        let result = parser.parse(expression);
        let numerical_value = parser.numerical_value();

        match result {
            Ok(q) => {
                debug!(expression, value = q.value(), "parsed");
                if self.json {
                    let report = Report::success(expression, &q, numerical_value, &self.registry);
                    writeln!(out, "{}", to_json(&report))
                } else {
                    writeln!(out, "{}", report_line(expression, &q, &self.registry))
                }
            }
            Err(err) => {
                self.failures += 1;
                if self.json {
                    writeln!(out, "{}", to_json(&Report::failure(expression, &err)))
                } else {
                    writeln!(out, "{}", error_lines(&err))
                }
            }
        }
    }

    /// Read expressions line by line until "exit" or end of input; a console
    /// gets a banner and a prompt.
    fn interactive(
        &mut self,
        input: &mut impl BufRead,
        out: &mut impl Write,
        console: bool,
    ) -> io::Result<()> {
        if console {
            writeln!(out, "\nphysunits {}\n\nCommands: help, exit (or Ctrl+D)\n", VERSION)?;
        }

        loop {
            if console {
                write!(out, ">")?;
                out.flush()?;
            }

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let expression = line.trim_end_matches(['\n', '\r']);

            match expression {
                "" => continue,
                "exit" => return Ok(()),
                "help" => writeln!(out, "{}", Args::command().render_long_help())?,
                _ => self.evaluate(expression, out)?,
            }
        }
    }
}

fn to_json(report: &Report) -> String {
    serde_json::to_string(report).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
}

fn run(args: Args) -> io::Result<ExitCode> {
    let mut stdout = io::stdout().lock();

    if args.expressions.is_empty() {
        writeln!(stdout, "{}", Args::command().render_help())?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut session = Session::new(args.parser_options(), args.json);
    for expression in &args.expressions {
        if expression == "-" {
            let stdin = io::stdin();
            let console = stdin.is_terminal();
            session.interactive(&mut stdin.lock(), &mut stdout, console)?;
        } else {
            session.evaluate(expression, &mut stdout)?;
        }
    }

    if session.failures > 0 {
        warn!(failures = session.failures, "some expressions failed to parse");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
