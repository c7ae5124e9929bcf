//! Session context: where the collections live and how they behave.

use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};
use crate::controller::{ContactsController, FinanceController, NotesController, TasksController};
use crate::entity::Record;
use crate::error::Result;
use crate::storage::RecordStore;

/// Passed to every collection session instead of global state.
#[derive(Debug, Clone)]
pub struct Workspace {
    data_dir: PathBuf,
    config: Config,
}

impl Workspace {
    pub fn new(data_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            data_dir: data_dir.into(),
            config,
        }
    }

    /// Open a workspace, reading `config_path` or `<data_dir>/assistant.json`.
    pub fn open(data_dir: impl Into<PathBuf>, config_path: Option<&Path>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir.join(CONFIG_FILE));
        let config = Config::load(&config_path)?;
        Ok(Self::new(data_dir, config))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn store<R: Record>(&self, file: &str) -> Result<RecordStore<R>> {
        RecordStore::open(self.data_dir.join(file), self.config.id_policy)
    }

    pub fn notes(&self) -> Result<NotesController> {
        Ok(NotesController::new(self.store(&self.config.files.notes)?))
    }

    pub fn tasks(&self) -> Result<TasksController> {
        Ok(TasksController::new(self.store(&self.config.files.tasks)?))
    }

    pub fn contacts(&self) -> Result<ContactsController> {
        Ok(ContactsController::new(
            self.store(&self.config.files.contacts)?,
        ))
    }

    pub fn finance(&self) -> Result<FinanceController> {
        Ok(FinanceController::new(
            self.store(&self.config.files.finance)?,
            self.config.date_filter,
        ))
    }
}
