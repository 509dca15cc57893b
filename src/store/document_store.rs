// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Undine-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Undine and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::DocumentName;

const STORE_FILENAME: &str = "undine-documents.json";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    DocumentNotFound {
        name: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::DocumentNotFound { name } => write!(f, "no document named '{name}'"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::DocumentNotFound { .. } => None,
        }
    }
}

/// One saved document: the scenescript text plus its last-modified stamp
/// in milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredDocument {
    content: String,
    modified_millis: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    documents: BTreeMap<String, StoredDocument>,
    #[serde(default)]
    last_document: Option<String>,
}

/// A list row: name and modification stamp, without the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub name: DocumentName,
    pub modified_millis: u64,
}

/// Named-document persistence over a single JSON index file.
///
/// The store is a stateless handle; every operation reads the index,
/// applies its change and writes the whole file back via a temp file and
/// an atomic rename. Saving or loading a document also moves the
/// last-document pointer, which the front-end uses to reopen the most
/// recent work.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.join(STORE_FILENAME)
    }

    /// All documents, most recently modified first. Index entries whose
    /// name does not parse as a document name are skipped, not fatal.
    pub fn list_documents(&self) -> Result<Vec<DocumentEntry>, StoreError> {
        let file = self.read_index()?;
        let mut entries: Vec<DocumentEntry> = file
            .documents
            .into_iter()
            .filter_map(|(name, doc)| {
                let name = DocumentName::new(name).ok()?;
                Some(DocumentEntry {
                    name,
                    modified_millis: doc.modified_millis,
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            b.modified_millis
                .cmp(&a.modified_millis)
                .then_with(|| a.name.as_str().cmp(b.name.as_str()))
        });
        Ok(entries)
    }

    /// Loads a document's scenescript text and marks it as the last one
    /// opened.
    pub fn load_document(&self, name: &DocumentName) -> Result<String, StoreError> {
        let mut file = self.read_index()?;
        let content = file
            .documents
            .get(name.as_str())
            .map(|doc| doc.content.clone())
            .ok_or_else(|| StoreError::DocumentNotFound {
                name: name.as_str().to_owned(),
            })?;
        if file.last_document.as_deref() != Some(name.as_str()) {
            file.last_document = Some(name.as_str().to_owned());
            self.write_index(&file)?;
        }
        Ok(content)
    }

    /// Saves (or overwrites) a document and moves the last-document
    /// pointer to it.
    pub fn save_document(&self, name: &DocumentName, content: &str) -> Result<(), StoreError> {
        let mut file = self.read_index()?;
        file.documents.insert(
            name.as_str().to_owned(),
            StoredDocument {
                content: content.to_owned(),
                modified_millis: now_millis(),
            },
        );
        file.last_document = Some(name.as_str().to_owned());
        self.write_index(&file)
    }

    /// Renames a document, keeping its content and stamp. An existing
    /// document under the new name is overwritten.
    pub fn rename_document(&self, old: &DocumentName, new: &DocumentName) -> Result<(), StoreError> {
        if old.as_str() == new.as_str() {
            return Ok(());
        }
        let mut file = self.read_index()?;
        let doc = file.documents.remove(old.as_str()).ok_or_else(|| {
            StoreError::DocumentNotFound {
                name: old.as_str().to_owned(),
            }
        })?;
        file.documents.insert(new.as_str().to_owned(), doc);
        if file.last_document.as_deref() == Some(old.as_str()) {
            file.last_document = Some(new.as_str().to_owned());
        }
        self.write_index(&file)
    }

    /// Deletes a document. The last-document pointer is cleared when it
    /// pointed at the deleted name.
    pub fn delete_document(&self, name: &DocumentName) -> Result<(), StoreError> {
        let mut file = self.read_index()?;
        if file.documents.remove(name.as_str()).is_none() {
            return Err(StoreError::DocumentNotFound {
                name: name.as_str().to_owned(),
            });
        }
        if file.last_document.as_deref() == Some(name.as_str()) {
            file.last_document = None;
        }
        self.write_index(&file)
    }

    /// The name most recently saved or loaded, if it still exists.
    pub fn last_document(&self) -> Result<Option<DocumentName>, StoreError> {
        let file = self.read_index()?;
        Ok(file
            .last_document
            .filter(|name| file.documents.contains_key(name))
            .and_then(|name| DocumentName::new(name).ok()))
    }

    /// Writes a document's raw scenescript text to `target`, for use
    /// outside the store.
    pub fn export_document(&self, name: &DocumentName, target: &Path) -> Result<(), StoreError> {
        let file = self.read_index()?;
        let doc = file.documents.get(name.as_str()).ok_or_else(|| {
            StoreError::DocumentNotFound {
                name: name.as_str().to_owned(),
            }
        })?;
        write_atomic(target, doc.content.as_bytes())
    }

    /// Reads the index, treating a missing file as an empty store and a
    /// corrupt file as an empty store plus the error that made it so. The
    /// front-end keeps running either way.
    pub fn load_or_init(&self) -> (Vec<DocumentEntry>, Option<StoreError>) {
        match self.list_documents() {
            Ok(entries) => (entries, None),
            Err(err) => (Vec::new(), Some(err)),
        }
    }

    fn read_index(&self) -> Result<StoreFile, StoreError> {
        let path = self.store_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(StoreFile::default());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Json { path, source })
    }

    fn write_index(&self, file: &StoreFile) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        let path = self.store_path();
        let mut json = serde_json::to_string_pretty(file).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        json.push('\n');
        write_atomic(&path, json.as_bytes())
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(".{file_name}.{}.{nanos}.tmp", std::process::id()));

    let result = (|| -> io::Result<()> {
        let mut tmp = fs::File::create(&tmp_path)?;
        tmp.write_all(contents)?;
        tmp.flush()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(source) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use rstest::{fixture, rstest};

    use super::{DocumentStore, StoreError};
    use crate::model::DocumentName;

    static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempDir {
        path: std::path::PathBuf,
    }

    impl TempDir {
        fn new(prefix: &str) -> Self {
            let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
            let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = env::temp_dir();
            path.push(format!("undine-{prefix}-{}-{nanos}-{counter}", std::process::id()));
            std::fs::create_dir_all(&path).unwrap();
            Self { path }
        }

        fn path(&self) -> &std::path::Path {
            &self.path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    struct StoreTestCtx {
        tmp: TempDir,
        store: DocumentStore,
    }

    impl StoreTestCtx {
        fn new(prefix: &str) -> Self {
            let tmp = TempDir::new(prefix);
            let store = DocumentStore::new(tmp.path().join("documents"));
            Self { tmp, store }
        }
    }

    #[fixture]
    fn ctx() -> StoreTestCtx {
        StoreTestCtx::new("document-store")
    }

    fn name(raw: &str) -> DocumentName {
        DocumentName::new(raw).unwrap()
    }

    #[rstest]
    fn save_then_load_round_trips_content(ctx: StoreTestCtx) {
        let store = &ctx.store;
        store.save_document(&name("quest"), "# start\nhello\n").unwrap();

        let content = store.load_document(&name("quest")).unwrap();
        assert_eq!(content, "# start\nhello\n");
        assert_eq!(store.last_document().unwrap(), Some(name("quest")));
    }

    #[rstest]
    fn missing_store_file_lists_as_empty(ctx: StoreTestCtx) {
        assert!(ctx.store.list_documents().unwrap().is_empty());
        assert_eq!(ctx.store.last_document().unwrap(), None);
    }

    #[rstest]
    fn load_of_unknown_name_is_an_error(ctx: StoreTestCtx) {
        let result = ctx.store.load_document(&name("nope"));
        assert!(matches!(
            result,
            Err(StoreError::DocumentNotFound { name }) if name == "nope"
        ));
    }

    #[rstest]
    fn list_orders_by_stamp_most_recent_first(ctx: StoreTestCtx) {
        let store = &ctx.store;
        store.save_document(&name("first"), "a").unwrap();
        store.save_document(&name("second"), "b").unwrap();

        // Stamps may collide within a millisecond; force distinct ones.
        let path = store.store_path();
        let mut json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        json["documents"]["first"]["modified_millis"] = 1000.into();
        json["documents"]["second"]["modified_millis"] = 2000.into();
        std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        let entries = store.list_documents().unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[rstest]
    fn rename_moves_content_and_follows_the_last_pointer(ctx: StoreTestCtx) {
        let store = &ctx.store;
        store.save_document(&name("draft"), "text").unwrap();

        store.rename_document(&name("draft"), &name("final")).unwrap();

        assert_eq!(store.load_document(&name("final")).unwrap(), "text");
        assert!(matches!(
            store.load_document(&name("draft")),
            Err(StoreError::DocumentNotFound { .. })
        ));
        assert_eq!(store.last_document().unwrap(), Some(name("final")));
    }

    #[rstest]
    fn rename_of_unknown_name_is_an_error(ctx: StoreTestCtx) {
        let result = ctx.store.rename_document(&name("nope"), &name("other"));
        assert!(matches!(result, Err(StoreError::DocumentNotFound { .. })));
    }

    #[rstest]
    fn delete_removes_the_document_and_clears_the_last_pointer(ctx: StoreTestCtx) {
        let store = &ctx.store;
        store.save_document(&name("gone"), "x").unwrap();
        store.delete_document(&name("gone")).unwrap();

        assert!(store.list_documents().unwrap().is_empty());
        assert_eq!(store.last_document().unwrap(), None);
        assert!(matches!(
            store.delete_document(&name("gone")),
            Err(StoreError::DocumentNotFound { .. })
        ));
    }

    #[rstest]
    fn export_writes_raw_scenescript_text(ctx: StoreTestCtx) {
        let store = &ctx.store;
        store.save_document(&name("quest"), "# start\nhello\n").unwrap();

        let target = ctx.tmp.path().join("quest.scene");
        store.export_document(&name("quest"), &target).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "# start\nhello\n");
    }

    #[rstest]
    fn corrupt_index_degrades_to_an_empty_store_with_the_error(ctx: StoreTestCtx) {
        let store = &ctx.store;
        std::fs::create_dir_all(store.root()).unwrap();
        std::fs::write(store.store_path(), "{not json").unwrap();

        let (entries, err) = store.load_or_init();
        assert!(entries.is_empty());
        assert!(matches!(err, Some(StoreError::Json { .. })));
    }

    #[rstest]
    fn save_overwrites_in_place(ctx: StoreTestCtx) {
        let store = &ctx.store;
        store.save_document(&name("quest"), "old").unwrap();
        store.save_document(&name("quest"), "new").unwrap();

        assert_eq!(store.load_document(&name("quest")).unwrap(), "new");
        assert_eq!(store.list_documents().unwrap().len(), 1);
    }
}
