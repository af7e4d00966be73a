//! Command-line interface: argument surface, messages, flow dispatch.

mod args;
pub mod prompts;
mod quiet;
mod run;

pub use args::Cli;
pub use run::run;
