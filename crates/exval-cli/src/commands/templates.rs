//! Implementation of the `exval templates` command.

use exval::templates;
use serde::Serialize;

use crate::output::table::format_templates_table;

/// Arguments for the templates command.
#[derive(Debug, clap::Args)]
pub struct TemplatesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct TemplateJson {
    name: &'static str,
    expression: &'static str,
}

/// Run the templates command.
pub fn run_templates(args: TemplatesArgs) -> miette::Result<i32> {
    if args.json {
        let output: Vec<TemplateJson> = templates::ALL
            .iter()
            .map(|&(name, expression)| TemplateJson { name, expression })
            .collect();
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| miette::miette!("Failed to serialize output: {}", e))?;
        println!("{}", json);
    } else {
        println!("{}", format_templates_table(templates::ALL));
    }
    Ok(exitcode::OK)
}
