use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cleaver", version, about = "Codebase health analysis and refactoring triggers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Raise log output to debug
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one analysis pass and print the report
    Analyze {
        /// Project root (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Decide but never emit refactor requests
        #[arg(long)]
        no_execute: bool,
    },
    /// Run a pass, dispatch fixes for failing checks, then re-check once
    Fix {
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Show files currently in cooldown
    History {
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Mark files as refactored now, starting their cooldown
    Mark {
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
}
