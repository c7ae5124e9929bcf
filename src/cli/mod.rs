mod commands;
mod menu;

pub use commands::Cli;
pub use menu::run_main_menu;
