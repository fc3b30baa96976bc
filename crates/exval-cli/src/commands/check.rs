//! Implementation of the `exval check` command.

use exval::normalize;
use exval::parser::parse_expression;
use owo_colors::{OwoColorize, Stream};

use super::ExpressionArgs;
use crate::output::ExpressionDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub expression: ExpressionArgs,
}

/// Run the check command.
///
/// The normalized expression must parse. Identifiers are listed but not
/// resolved, since no object is involved.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let expression = args.expression.source()?;
    let normalized = normalize(&expression, args.expression.member.as_deref());

    match parse_expression(&normalized) {
        Ok(expr) => {
            let mut identifiers: Vec<&str> = Vec::new();
            for name in expr.identifiers() {
                if !identifiers.contains(&name) {
                    identifiers.push(name);
                }
            }
            println!(
                "{} {}",
                "ok".if_supports_color(Stream::Stdout, |t| t.green()),
                normalized.trim()
            );
            if !identifiers.is_empty() {
                println!("references: {}", identifiers.join(", "));
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            let diagnostic = ExpressionDiagnostic::from_parse_error(&expression, &normalized, &e);
            eprintln!("{:?}", miette::Report::new(diagnostic));
            Ok(exitcode::DATAERR)
        }
    }
}
