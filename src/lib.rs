pub mod calculator;
pub mod cli;
pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod storage;
pub mod workspace;

pub use config::Config;
pub use error::{AssistantError, Result};
pub use storage::RecordStore;
pub use workspace::Workspace;
