//! Command-line front end for the campaign-planning backend: resource pages
//! as tables, record CRUD and the project timeline.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::{describe, run};
