// linedit library exports

pub mod app;
pub mod command_processor;
pub mod config;
pub mod launch;

pub use app::App;
pub use command_processor::{Command, CommandError, CommandProcessor, Outcome};
pub use config::Config;
pub use launch::LaunchError;
