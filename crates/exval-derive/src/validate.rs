//! Compile-time validation for `#[derive(Describe)]`.
//!
//! Checks:
//! 1. Unknown `#[describe(...)]` options, with typo suggestions
//! 2. `skip` combined with other options
//! 3. Empty member names from `rename`
//! 4. Two fields exposing the same member name

use std::collections::HashMap;

use proc_macro2::Span;
use strsim::levenshtein;
use syn::Ident;

use crate::input::{MacroInput, OptionTarget, UnknownOption};

/// Options accepted on the struct.
const STRUCT_OPTIONS: &[&str] = &["rename"];

/// Options accepted on fields.
const FIELD_OPTIONS: &[&str] = &["read_only", "skip", "rename"];

/// Main validation entry point.
pub fn validate(input: &MacroInput, unknown: &[UnknownOption]) -> syn::Result<()> {
    let mut errors: Option<syn::Error> = None;
    let mut push = |span: Span, message: String| {
        let error = syn::Error::new(span, message);
        match &mut errors {
            Some(existing) => existing.combine(error),
            None => errors = Some(error),
        }
    };

    for option in unknown {
        let available = match option.target {
            OptionTarget::Struct => STRUCT_OPTIONS,
            OptionTarget::Field => FIELD_OPTIONS,
        };
        let suggestions = compute_suggestions(&option.name, available);
        let mut msg = format!("unknown describe option '{}'", option.name);
        if let Some(first) = suggestions.first() {
            msg.push_str(&format!("\nhelp: did you mean '{first}'?"));
        } else {
            msg.push_str(&format!(
                "\nnote: available options: {}",
                available.join(", ")
            ));
        }
        push(option.span, msg);
    }

    let mut seen: HashMap<&str, &Ident> = HashMap::new();
    for field in &input.fields {
        if let Some(skip) = field.options.skip {
            if field.options.read_only.is_some() || field.options.rename.is_some() {
                push(
                    skip,
                    format!(
                        "field '{}' is skipped, so other describe options have no effect",
                        field.ident
                    ),
                );
            }
            continue;
        }

        if field.member.name.trim().is_empty() {
            push(field.member.span, "member name cannot be empty".to_string());
            continue;
        }

        if let Some(previous) = seen.get(field.member.name.as_str()) {
            push(
                field.member.span,
                format!(
                    "member name '{}' is already used by field '{previous}'",
                    field.member.name
                ),
            );
        } else {
            seen.insert(&field.member.name, &field.ident);
        }
    }

    errors.map_or(Ok(()), Err)
}

/// Compute typo suggestions for an unknown name.
fn compute_suggestions(name: &str, available: &[&str]) -> Vec<String> {
    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .map(|candidate| (levenshtein(name, candidate), *candidate))
        .filter(|(distance, _)| *distance <= 2)
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);
    scored
        .into_iter()
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
