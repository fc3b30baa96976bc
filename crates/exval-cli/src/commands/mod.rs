//! CLI command implementations.

mod check;
mod eval;
mod normalize;
mod templates;

pub use check::{run_check, CheckArgs};
pub use eval::{run_eval, EvalArgs};
pub use normalize::{run_normalize, NormalizeArgs};
pub use templates::{run_templates, TemplatesArgs};

use exval::templates::find as find_template;

/// Expression selection shared by the expression commands.
#[derive(Debug, clap::Args)]
pub struct ExpressionArgs {
    /// Expression text, e.g. "PropertyA > PropertyB"
    #[arg(short, long, required_unless_present = "template")]
    pub expression: Option<String>,

    /// Named template instead of an expression (see `exval templates`)
    #[arg(short, long, conflicts_with = "expression")]
    pub template: Option<String>,

    /// Member substituted for {0}
    #[arg(short, long)]
    pub member: Option<String>,
}

impl ExpressionArgs {
    /// The expression text, resolving a template name if one was given.
    pub fn source(&self) -> miette::Result<String> {
        match (&self.expression, &self.template) {
            (Some(expression), _) => Ok(expression.clone()),
            (None, Some(name)) => find_template(name)
                .map(str::to_string)
                .ok_or_else(|| miette::miette!(
                    help = "run `exval templates` to list the available names",
                    "unknown template '{}'",
                    name
                )),
            (None, None) => Err(miette::miette!("an expression or template is required")),
        }
    }
}
