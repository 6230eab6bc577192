//! Command dispatch, kept out of the binary so it stays a thin shell.

use super::args::Commands;
use super::handlers::{handle_analyze, handle_fix, handle_history, handle_mark};
use crate::exit::CleaverExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<CleaverExit> {
    match command {
        Commands::Analyze {
            root,
            json,
            no_execute,
        } => handle_analyze(root, json, no_execute),
        Commands::Fix { root, json } => handle_fix(root, json),
        Commands::History { root, json } => handle_history(root, json),
        Commands::Mark { paths, root } => handle_mark(root, &paths),
    }
}
