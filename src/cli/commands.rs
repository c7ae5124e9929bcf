use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "personal-assistant")]
#[command(version, about = "Notes, tasks, contacts and finances in your terminal")]
pub struct Cli {
    /// Directory holding the collection files
    #[arg(long, env = "ASSISTANT_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Config file (defaults to <DATA_DIR>/assistant.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Default tracing filter when RUST_LOG is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "personal_assistant=debug"
        } else {
            "personal_assistant=warn"
        }
    }
}
