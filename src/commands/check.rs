//! Implementation of the `trackersheet check` command.
//!
//! Resolves the config and prints one line per sheet. On failure the caller
//! prints every recorded error.

use crate::cli::CheckArgs;
use crate::config::{Config, TrackerParams};
use crate::error::Result;

/// Execute the `trackersheet check` command.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    tracing::info!(
        path = %args.config.display(),
        sheets = config.sheet_names.len(),
        "config resolved"
    );

    print!("{}", render_summary(&config));
    Ok(())
}

/// Human-readable summary of a resolved config.
pub fn render_summary(config: &Config) -> String {
    let mut out = String::new();

    let tracker = match &config.tracker {
        TrackerParams::Bugzilla(bz) => format!("bugzilla {}", bz.url),
        TrackerParams::Jira(jira) => {
            format!("jira {} (max results {})", jira.server, jira.max_results)
        }
    };
    out.push_str("Config OK\n");
    out.push_str(&format!("  Tracker:     {}\n", tracker));
    out.push_str(&format!("  Spreadsheet: {}\n", config.spreadsheet_id));
    out.push_str(&format!("  Sheets ({}):\n", config.sheet_names.len()));

    for (name, sheet, query) in config.sheets_in_order() {
        let literal = sheet.columns.values().filter(|c| c.is_literal()).count();
        let origin = if sheet.shares_columns_with(&config.defaults) {
            ", spreadsheet columns"
        } else {
            ""
        };
        out.push_str(&format!(
            "    {}: {} column(s), {} literal{}, key {}\n",
            name,
            sheet.columns.len(),
            literal,
            origin,
            sheet.key.as_deref().unwrap_or("-")
        ));
        out.push_str(&format!("      query: {}\n", query));
    }

    out
}
