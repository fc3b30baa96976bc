//! Implementation of the `exval normalize` command.

use exval::normalize;
use serde::Serialize;

use super::ExpressionArgs;

/// Arguments for the normalize command.
#[derive(Debug, clap::Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub expression: ExpressionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct NormalizeJson {
    expression: String,
    normalized: String,
}

/// Run the normalize command.
pub fn run_normalize(args: NormalizeArgs) -> miette::Result<i32> {
    let expression = args.expression.source()?;
    let normalized = normalize(&expression, args.expression.member.as_deref());

    if args.json {
        let output = NormalizeJson {
            expression,
            normalized,
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| miette::miette!("Failed to serialize output: {}", e))?;
        println!("{}", json);
    } else {
        println!("{}", normalized);
    }
    Ok(exitcode::OK)
}
