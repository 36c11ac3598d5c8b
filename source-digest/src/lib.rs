pub mod cli;
pub mod load_config;
pub mod viewer;

pub use cli::{run, Cli, Commands};
