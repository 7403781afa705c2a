pub mod commands;
pub mod config;

pub use commands::{Cli, Command, run};
pub use config::TimeArgs;
