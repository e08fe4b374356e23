//! NoteStore — the whole note collection as one JSON document
//!
//! Every save goes through a temporary file and a rename, so a reader sees
//! either the previous document or the new one. Read-modify-write cycles run
//! under a single writer lock.

use super::errors::StoreError;
use super::file_ops;
use notes_types::NotesDocument;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

pub struct NoteStore {
    data_file: PathBuf,
    write_lock: Mutex<()>,
}

impl NoteStore {
    /// Bind a store to a document path. Nothing is read or written until first use.
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the document path
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Load the current collection, creating an empty document if none exists
    pub fn load(&self) -> Result<NotesDocument, StoreError> {
        if let Some(doc) = self.read()? {
            return Ok(doc);
        }
        let _guard = self.write_lock.lock();
        self.read_or_init_locked()
    }

    /// Persist the entire collection, replacing any prior content. The server
    /// only writes through [`NoteStore::mutate`]; tests use this to seed documents.
    #[cfg(test)]
    pub fn save(&self, doc: &NotesDocument) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        self.save_locked(doc)
    }

    /// Run `load -> f -> save` as one critical section.
    ///
    /// A missing document starts out empty in memory, so the cycle performs
    /// exactly one save. If `f` returns an error nothing is written.
    pub fn mutate<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut NotesDocument) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock();
        let mut doc = self.read()?.unwrap_or_default();
        let out = f(&mut doc)?;
        self.save_locked(&doc)?;
        Ok(out)
    }

    fn read(&self) -> Result<Option<NotesDocument>, StoreError> {
        let raw = file_ops::read_document(&self.data_file)
            .map_err(|e| StoreError::io(&self.data_file, e))?;
        match raw {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Corrupt {
                    path: self.data_file.clone(),
                    source,
                }),
            None => Ok(None),
        }
    }

    // Caller holds `write_lock`; re-checks so a concurrent save is never clobbered
    fn read_or_init_locked(&self) -> Result<NotesDocument, StoreError> {
        if let Some(doc) = self.read()? {
            return Ok(doc);
        }
        let doc = NotesDocument::default();
        self.save_locked(&doc)?;
        log::info!(
            "[NOTES] Initialized empty notes document at {}",
            self.data_file.display()
        );
        Ok(doc)
    }

    fn save_locked(&self, doc: &NotesDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc).map_err(StoreError::Serialize)?;
        file_ops::write_atomic(&self.data_file, &json)
            .map_err(|e| StoreError::io(&self.data_file, e))
    }
}
