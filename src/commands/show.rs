//! Implementation of the `trackersheet show` command.

use crate::cli::{OutputFormat, ShowArgs};
use crate::config::Config;
use crate::error::Result;

/// Execute the `trackersheet show` command.
pub fn cmd_show(args: ShowArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    print!("{}", render(&config, args.format)?);
    Ok(())
}

/// Resolved config in the requested format, newline-terminated.
pub fn render(config: &Config, format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Yaml => config.to_yaml()?,
        OutputFormat::Json => config.to_json()?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
