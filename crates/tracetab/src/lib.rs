#![forbid(unsafe_code)]

pub mod cli;
pub mod flatten;
pub mod guard;
pub mod models;
pub mod pipeline;
pub mod rank;
pub mod utils;

pub use cli::app::{Cli, Command};
