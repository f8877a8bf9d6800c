//! Command implementations for trackersheet.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod check;
mod show;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Check(args) => check::cmd_check(args),
        Command::Show(args) => show::cmd_show(args),
    }
}
