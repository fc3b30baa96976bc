//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Format `(name, expression)` template pairs as a table.
pub fn format_templates_table(templates: &[(&str, &str)]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Template", "Expression"]);

    for (name, expression) in templates {
        table.add_row(vec![*name, *expression]);
    }

    table
}
