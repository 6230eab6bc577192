pub mod analysis;
pub mod autofix;
pub mod checks;
pub mod cli;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod events;
pub mod executor;
pub mod exit;
pub mod file_class;
pub mod history;
pub mod report;
pub mod reporting;
pub mod source;
pub mod suggest;
pub mod types;
