use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{io_err, StorageError};

/// Handle to one named note inside the store's folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Named markdown documents in a single configured folder.
///
/// Documents are addressed as `{folder}/{name}.md`. The store never reads
/// content back; each sync cycle rebuilds a document from scratch.
pub struct NoteStore {
    folder: PathBuf,
}

impl NoteStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.folder.join(format!("{name}.md"))
    }

    /// Resolve `{folder}/{name}.md`, creating the folder and an empty
    /// document if either is missing. Existing content is left alone.
    pub async fn get_or_create(&self, name: &str) -> Result<Document, StorageError> {
        fs::create_dir_all(&self.folder)
            .await
            .map_err(|e| io_err(&self.folder, e))?;

        let path = self.document_path(name);
        let exists = fs::try_exists(&path).await.map_err(|e| io_err(&path, e))?;
        if !exists {
            fs::write(&path, "").await.map_err(|e| io_err(&path, e))?;
            debug!(path = %path.display(), "created note");
        }
        Ok(Document { path })
    }

    /// Replace the document's content with the empty string.
    pub async fn clear(&self, document: &Document) -> Result<(), StorageError> {
        fs::write(&document.path, "")
            .await
            .map_err(|e| io_err(&document.path, e))
    }

    /// Append `text` after the document's current content.
    pub async fn append(&self, document: &Document, text: &str) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&document.path)
            .await
            .map_err(|e| io_err(&document.path, e))?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|e| io_err(&document.path, e))?;
        file.flush().await.map_err(|e| io_err(&document.path, e))
    }

    /// Get-or-create followed by clear: afterwards the document exists and
    /// is empty.
    pub async fn prepare_fresh(&self, name: &str) -> Result<Document, StorageError> {
        let document = self.get_or_create(name).await?;
        self.clear(&document).await?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> NoteStore {
        NoteStore::new(dir.path().join("notes"))
    }

    fn read(document: &Document) -> String {
        std::fs::read_to_string(document.path()).unwrap()
    }

    #[tokio::test]
    async fn get_or_create_makes_folder_and_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let document = store.get_or_create("Inbox").await.unwrap();

        assert_eq!(document.path(), dir.path().join("notes").join("Inbox.md"));
        assert_eq!(read(&document), "");
    }

    #[tokio::test]
    async fn get_or_create_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let document = store.get_or_create("Inbox").await.unwrap();
        store.append(&document, "kept").await.unwrap();

        let again = store.get_or_create("Inbox").await.unwrap();
        assert_eq!(again, document);
        assert_eq!(read(&again), "kept");
    }

    #[tokio::test]
    async fn append_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let document = store.get_or_create("Inbox").await.unwrap();
        store.append(&document, "first ").await.unwrap();
        store.append(&document, "second").await.unwrap();

        assert_eq!(read(&document), "first second");
    }

    #[tokio::test]
    async fn clear_empties_the_document() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let document = store.get_or_create("Inbox").await.unwrap();
        store.append(&document, "old content").await.unwrap();
        store.clear(&document).await.unwrap();

        assert_eq!(read(&document), "");
    }

    #[tokio::test]
    async fn prepare_fresh_resets_an_existing_document() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let document = store.get_or_create("Inbox").await.unwrap();
        store.append(&document, "stale").await.unwrap();

        let fresh = store.prepare_fresh("Inbox").await.unwrap();
        assert_eq!(fresh, document);
        assert_eq!(read(&fresh), "");
    }

    #[tokio::test]
    async fn append_to_removed_document_fails_with_path() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let document = store.get_or_create("Inbox").await.unwrap();
        std::fs::remove_file(document.path()).unwrap();

        let err = store.append(&document, "x").await.unwrap_err();
        let StorageError::Io { path, .. } = err;
        assert_eq!(path, document.path());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn append_to_read_only_document_fails() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let document = store.get_or_create("Inbox").await.unwrap();
        let perms = std::fs::Permissions::from_mode(0o444);
        std::fs::set_permissions(document.path(), perms).unwrap();

        let result = store.append(&document, "x").await;
        assert!(result.is_err());

        let perms = std::fs::Permissions::from_mode(0o644);
        std::fs::set_permissions(document.path(), perms).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn get_or_create_fails_in_unwritable_folder() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.get_or_create("Inbox").await.unwrap();

        let folder = dir.path().join("notes");
        let perms = std::fs::Permissions::from_mode(0o555);
        std::fs::set_permissions(&folder, perms).unwrap();

        let result = store.get_or_create("Other").await;
        assert!(result.is_err());

        let perms = std::fs::Permissions::from_mode(0o755);
        std::fs::set_permissions(&folder, perms).unwrap();
    }
}
