use clap::{Parser as _, ValueEnum};
use regast::{ast::Expression, parse, Diagnostics, ParserOptions};
use serde::Serialize;
use std::io::BufRead;

/// Parses regular expression patterns and prints their syntax tree.
#[derive(Debug, clap::Parser)]
#[command(name = "regast", version)]
struct Args {
    /// Pattern to parse. `-` reads one pattern per line from stdin.
    pattern: String,

    /// Parse in unicode mode (the `u` flag).
    #[arg(short, long)]
    unicode: bool,

    #[arg(short, long, value_enum, default_value_t = Format::Debug)]
    format: Format,

    /// Exit with an error when any pattern reports diagnostics.
    #[arg(long)]
    deny_diagnostics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Rust debug representation of the tree.
    Debug,
    /// The tree and its diagnostics as JSON.
    Json,
    /// The tree printed back as a pattern.
    Regex,
}

#[derive(Serialize)]
struct Report<'a> {
    pattern: &'a str,
    expression: &'a Expression,
    diagnostics: &'a Diagnostics,
}

/// Parses and prints a single pattern. Returns the amount of diagnostics.
fn inspect(
    pattern: &str,
    options: ParserOptions,
    format: Format,
) -> Result<usize, Box<dyn std::error::Error>> {
    let output = parse(pattern, options);

    match format {
        Format::Debug => println!("{:#?}", output.expression),
        Format::Json => {
            let report = Report {
                pattern,
                expression: &output.expression,
                diagnostics: &output.diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Regex => println!("{}", output.expression),
    }

    eprint!("{}", output.diagnostics);

    Ok(output.diagnostics.len())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let options = ParserOptions::new().with_unicode(args.unicode);

    let mut reported = 0;
    if args.pattern == "-" {
        for line in std::io::stdin().lock().lines() {
            reported += inspect(&line?, options, args.format)?;
        }
    } else {
        reported += inspect(&args.pattern, options, args.format)?;
    }

    if args.deny_diagnostics && reported > 0 {
        return Err(format!("{} diagnostic(s) reported", reported).into());
    }

    Ok(())
}
