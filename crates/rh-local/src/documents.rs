//! DocSpace: rich-text documents owned by the client alone.
//!
//! The collection is kept as a JSON array under one storage key and written
//! back after every mutation, including the one that empties it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rh_core::DocumentId;
use rh_core::entities::Document;

use crate::error::LocalError;
use crate::storage::LocalStorage;

pub const DOCUMENTS_KEY: &str = "docspace_documents";

#[derive(Debug)]
pub struct DocumentStore {
    storage: LocalStorage,
    documents: Vec<Document>,
    current: Option<DocumentId>,
}

impl DocumentStore {
    /// Load the persisted collection. A missing key is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`LocalError::Corrupt`] if the stored value isn't a document
    /// list.
    pub fn open(storage: LocalStorage) -> Result<Self, LocalError> {
        let documents = match storage.get_item(DOCUMENTS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| LocalError::Corrupt {
                key: DOCUMENTS_KEY.to_string(),
                source,
            })?,
            None => Vec::new(),
        };
        Ok(Self {
            storage,
            documents,
            current: None,
        })
    }

    /// Documents in creation order.
    #[must_use]
    pub fn list(&self) -> &[Document] {
        &self.documents
    }

    #[must_use]
    pub fn get(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| &d.id == id)
    }

    /// The document opened for editing, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Document> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    /// Create an empty document and open it.
    ///
    /// # Errors
    ///
    /// Returns [`LocalError::Validation`] for a blank title, or a storage
    /// error if persisting fails.
    pub fn create(&mut self, title: &str) -> Result<Document, LocalError> {
        let title = non_blank_title(title)?;
        let now = Utc::now();
        let doc = Document {
            id: self.unique_id(now.timestamp_millis()),
            title,
            content: String::new(),
            created_at: now,
        };
        let mut next = self.documents.clone();
        next.push(doc.clone());
        self.commit(next)?;
        self.current = Some(doc.id.clone());
        tracing::debug!(id = %doc.id, "document created");
        Ok(doc)
    }

    /// Open an existing document for editing.
    ///
    /// # Errors
    ///
    /// Returns [`LocalError::DocumentNotFound`] for an unknown id.
    pub fn open_document(&mut self, id: &DocumentId) -> Result<&Document, LocalError> {
        let doc = self
            .documents
            .iter()
            .find(|d| &d.id == id)
            .ok_or_else(|| LocalError::DocumentNotFound(id.clone()))?;
        self.current = Some(id.clone());
        Ok(doc)
    }

    /// Replace a document's title and content.
    ///
    /// # Errors
    ///
    /// Returns [`LocalError::DocumentNotFound`], [`LocalError::Validation`]
    /// for a blank title, or a storage error.
    pub fn save(
        &mut self,
        id: &DocumentId,
        title: &str,
        content: &str,
    ) -> Result<Document, LocalError> {
        let title = non_blank_title(title)?;
        let mut next = self.documents.clone();
        let doc = next
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(|| LocalError::DocumentNotFound(id.clone()))?;
        doc.title = title;
        doc.content = content.to_string();
        let saved = doc.clone();
        self.commit(next)?;
        Ok(saved)
    }

    /// Delete a document, closing it if it was open.
    ///
    /// # Errors
    ///
    /// Returns [`LocalError::DocumentNotFound`] or a storage error.
    pub fn delete(&mut self, id: &DocumentId) -> Result<Document, LocalError> {
        let index = self
            .documents
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| LocalError::DocumentNotFound(id.clone()))?;
        let mut next = self.documents.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        if self.current.as_ref() == Some(id) {
            self.current = None;
        }
        Ok(removed)
    }

    /// Write a document's content to `{dir}/{title}.html`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalError::DocumentNotFound`] or [`LocalError::Io`].
    pub fn export(&self, id: &DocumentId, dir: &Path) -> Result<PathBuf, LocalError> {
        let doc = self
            .get(id)
            .ok_or_else(|| LocalError::DocumentNotFound(id.clone()))?;
        let path = dir.join(safe_file_name(&doc.export_file_name()));
        fs::write(&path, &doc.content).map_err(|e| LocalError::io(&path, e))?;
        Ok(path)
    }

    /// Write `next`, then adopt it. A failed write leaves memory untouched.
    fn commit(&mut self, next: Vec<Document>) -> Result<(), LocalError> {
        let json = serde_json::to_string(&next)?;
        self.storage.set_item(DOCUMENTS_KEY, &json)?;
        self.documents = next;
        Ok(())
    }

    /// Millisecond id, bumped past any id already taken.
    fn unique_id(&self, millis: i64) -> DocumentId {
        let mut candidate = millis;
        loop {
            let id = DocumentId::new(candidate.to_string());
            if self.get(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }
}

fn non_blank_title(title: &str) -> Result<String, LocalError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LocalError::Validation(
            "document title must not be empty".to_string(),
        ));
    }
    Ok(title.to_string())
}

fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect()
}
