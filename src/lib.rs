pub mod commands;
pub mod config;
pub mod llm;
pub mod logger;
pub mod palette;
pub mod reframe;
pub mod suites;
pub mod utils;

pub use config::RunConfig;
pub use reframe::Reframe;
