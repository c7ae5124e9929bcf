use std::io;

use clap::Parser;
use personal_assistant::cli::{run_main_menu, Cli};
use personal_assistant::controller::Console;
use personal_assistant::Workspace;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Stdout carries the dialogue; logs go to stderr.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init()
        .ok();

    let result = Workspace::open(&cli.data_dir, cli.config.as_deref()).and_then(|workspace| {
        tracing::debug!(data_dir = %workspace.data_dir().display(), "workspace opened");
        let stdin = io::stdin();
        let mut console = Console::new(stdin.lock(), io::stdout());
        run_main_menu(&workspace, &mut console)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
