pub mod cli;
pub mod commands;
mod loader;

pub use loader::{ConfigLoader, load_config};
