use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::IdPolicy;
use crate::entity::{CsvRow, Record};
use crate::error::{AssistantError, Result};

/// One collection of records and the JSON file that backs it.
///
/// The in-memory list is authoritative for the session; `save` rewrites the
/// file from it.
pub struct RecordStore<R: Record> {
    records: Vec<R>,
    path: PathBuf,
    id_policy: IdPolicy,
}

impl<R: Record> RecordStore<R> {
    /// Open a collection. A missing file is an empty collection.
    pub fn open(path: impl Into<PathBuf>, id_policy: IdPolicy) -> Result<Self> {
        let path = path.into();
        let records = load_records(&path)?;
        debug!(kind = R::KIND, path = %path.display(), count = records.len(), "loaded collection");

        Ok(Self {
            records,
            path,
            id_policy,
        })
    }

    /// An unsaved, empty collection at `path`.
    pub fn empty(path: impl Into<PathBuf>, id_policy: IdPolicy) -> Self {
        Self {
            records: Vec::new(),
            path: path.into(),
            id_policy,
        }
    }

    /// Write the whole collection to disk, replacing the previous file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = tmp_path_for(&self.path);
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &self.records)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        debug!(kind = R::KIND, path = %self.path.display(), count = self.records.len(), "saved collection");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next added record will receive.
    pub fn next_id(&self) -> Result<u32> {
        let last = match self.id_policy {
            IdPolicy::NextFree => Some(self.records.iter().map(R::id).max().unwrap_or(0)),
            IdPolicy::Length => u32::try_from(self.records.len()).ok(),
        };
        last.and_then(|id| id.checked_add(1))
            .ok_or(AssistantError::IdsExhausted { kind: R::KIND })
    }

    pub fn find_by_id(&self, id: u32) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: u32) -> Option<&mut R> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Like `find_by_id`, with absence as an error.
    pub fn get(&self, id: u32) -> Result<&R> {
        self.find_by_id(id)
            .ok_or(AssistantError::RecordNotFound { kind: R::KIND, id })
    }

    /// Like `find_by_id_mut`, with absence as an error.
    pub fn get_mut(&mut self, id: u32) -> Result<&mut R> {
        self.find_by_id_mut(id)
            .ok_or(AssistantError::RecordNotFound { kind: R::KIND, id })
    }

    /// Build a record with the next id and append it.
    pub fn add(&mut self, build: impl FnOnce(u32) -> R) -> Result<&R> {
        let id = self.next_id()?;
        let mut record = build(id);
        // The builder may ignore its argument; the store owns id assignment.
        record.set_id(id);
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Remove the first record with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: u32) -> bool {
        match self.records.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Append every row of a CSV file, assigning fresh ids.
    ///
    /// Rows before a failing row stay imported.
    pub fn import_csv(&mut self, path: &Path) -> Result<usize> {
        if !path.is_file() {
            return Err(AssistantError::FileNotFound(path.to_path_buf()));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let mut imported = 0;
        for (index, row) in reader.records().enumerate() {
            // Header is line 1.
            let line = index + 2;
            let invalid = |e: &dyn std::fmt::Display| AssistantError::InvalidRecord {
                row: line,
                reason: e.to_string(),
            };
            let row = row.map_err(|e| invalid(&e))?;
            let id = self.next_id()?;
            let record =
                R::from_csv_row(&CsvRow::new(&headers, &row), id).map_err(|e| invalid(&e))?;
            self.records.push(record);
            imported += 1;
        }

        debug!(kind = R::KIND, path = %path.display(), imported, "imported CSV");
        Ok(imported)
    }

    /// Write the collection as CSV with the schema's fixed header.
    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(R::CSV_HEADER)?;
        for record in &self.records {
            writer.write_record(record.to_csv_row())?;
        }
        writer.flush().map_err(csv::Error::from)?;

        debug!(kind = R::KIND, path = %path.display(), count = self.records.len(), "exported CSV");
        Ok(self.records.len())
    }
}

fn load_records<R: Record>(path: &Path) -> Result<Vec<R>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| AssistantError::CorruptData {
        path: path.to_path_buf(),
        source,
    })
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
