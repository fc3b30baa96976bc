//! Implementation of the `exval eval` command.

use std::path::PathBuf;

use exval::{
    EvalOptions, ExpressionRule, ScalarType, ValidationOutcome, normalize, resolve_column_type,
};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use super::ExpressionArgs;
use crate::object::{describe_object, load_object, object_from_pairs};

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    #[command(flatten)]
    pub expression: ExpressionArgs,

    /// JSON file holding the object to validate
    #[arg(long, required_unless_present = "bindings", conflicts_with = "bindings")]
    pub object: Option<PathBuf>,

    /// Members in name=value format (repeatable)
    #[arg(short = 'b', long = "bind", value_parser = parse_key_val)]
    pub bindings: Vec<(String, String)>,

    /// Column types in name=Type format, e.g. Age=UInt8 (repeatable)
    #[arg(long = "type", value_parser = parse_column_type)]
    pub types: Vec<(String, ScalarType)>,

    /// Members to treat as read-only (repeatable)
    #[arg(long = "read-only")]
    pub read_only: Vec<String>,

    /// Compare strings by exact case
    #[arg(long)]
    pub case_sensitive: bool,

    /// Custom failure message; {0} is the member or type name
    #[arg(long)]
    pub message: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
struct EvalJson<'a> {
    expression: &'a str,
    normalized: String,
    #[serde(flatten)]
    outcome: &'a ValidationOutcome,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid binding format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Parse a name=Type column declaration.
fn parse_column_type(s: &str) -> Result<(String, ScalarType), String> {
    let (name, type_name) = parse_key_val(s)?;
    let ty = resolve_column_type(&type_name).ok_or_else(|| {
        let names: Vec<&str> = ScalarType::ALL.iter().map(|ty| ty.name()).collect();
        format!(
            "unknown column type '{}': expected one of {}",
            type_name,
            names.join(", ")
        )
    })?;
    Ok((name, ty))
}

/// Run the eval command.
///
/// Exit codes: `OK` when the object is valid, `DATAERR` when it is not, and
/// `CONFIG` when the expression cannot be evaluated against the object.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let expression = args.expression.source()?;
    let member = args.expression.member.as_deref();

    let (type_name, object) = match &args.object {
        Some(path) => {
            let object = load_object(path).map_err(|e| miette::miette!("{}", e))?;
            let name = path
                .file_stem()
                .map_or_else(|| "object".to_string(), |s| s.to_string_lossy().into_owned());
            (name, object)
        }
        None => ("object".to_string(), object_from_pairs(&args.bindings)),
    };
    let descriptor = describe_object(&type_name, &object, &args.read_only, &args.types);

    let options = EvalOptions::builder()
        .case_sensitive(args.case_sensitive)
        .build();
    let mut rule = ExpressionRule::builder()
        .expression(expression.as_str())
        .options(options)
        .build();
    if let Some(message) = &args.message {
        rule = rule
            .with_message(message)
            .map_err(|e| miette::miette!("Invalid message template: {}", e))?;
    }

    match rule.validate_with(&descriptor, &object, member) {
        Ok(outcome) => {
            if args.json {
                let output = EvalJson {
                    expression: &expression,
                    normalized: normalize(&expression, member),
                    outcome: &outcome,
                };
                let json = serde_json::to_string_pretty(&output)
                    .map_err(|e| miette::miette!("Failed to serialize output: {}", e))?;
                println!("{}", json);
            } else {
                print_outcome(&outcome);
            }
            if outcome.is_success() {
                Ok(exitcode::OK)
            } else {
                Ok(exitcode::DATAERR)
            }
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "expression": e.expression,
                    "normalized": e.normalized,
                    "error": e.source.to_string(),
                });
                let json = serde_json::to_string_pretty(&output)
                    .map_err(|e| miette::miette!("Failed to serialize output: {}", e))?;
                eprintln!("{}", json);
            } else {
                eprintln!("Evaluation error: {}", e);
            }
            Ok(exitcode::CONFIG)
        }
    }
}

fn print_outcome(outcome: &ValidationOutcome) {
    match outcome.failure() {
        None => println!("{}", "valid".if_supports_color(Stream::Stdout, |t| t.green())),
        Some(failure) => {
            println!(
                "{}: {}",
                "invalid".if_supports_color(Stream::Stdout, |t| t.red()),
                failure.message
            );
            if !failure.member_names.is_empty() {
                println!("members: {}", failure.member_names.join(", "));
            }
        }
    }
}
