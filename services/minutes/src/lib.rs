pub mod config;
pub mod driver;
pub mod prompt_loader;
