//! Filesystem-backed note storage.
//!
//! Every note is a single `<name>.txt` file in a flat cache directory. A note
//! exists iff its file does; there is no index or metadata beside the files.

use crate::error::NoteError;
use notes_store_types::Note;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Extension given to every note file
pub const NOTE_EXTENSION: &str = ".txt";

/// Reject names that could address anything outside the cache directory
pub fn validate_name(name: &str) -> Result<(), NoteError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
    {
        return Err(NoteError::InvalidName);
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NoteStore {
    cache_dir: PathBuf,
}

impl NoteStore {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn note_path(&self, name: &str) -> Result<PathBuf, NoteError> {
        validate_name(name)?;
        Ok(self.cache_dir.join(format!("{}{}", name, NOTE_EXTENSION)))
    }

    /// Create the cache directory (and parents) unless it is already accessible
    pub async fn ensure_cache_dir(&self) -> io::Result<()> {
        if fs::metadata(&self.cache_dir).await.is_err() {
            log::info!("Creating cache directory {}", self.cache_dir.display());
            fs::create_dir_all(&self.cache_dir).await?;
        }
        Ok(())
    }

    /// True if the note file can be accessed. Any access error counts as absent.
    pub async fn exists(&self, name: &str) -> bool {
        match self.note_path(name) {
            Ok(path) => fs::metadata(path).await.is_ok(),
            Err(_) => false,
        }
    }

    /// All `.txt` files in the cache directory, in enumeration order
    pub async fn list(&self) -> Result<Vec<Note>, NoteError> {
        let mut notes = Vec::new();
        let mut read_dir = fs::read_dir(&self.cache_dir).await?;

        while let Some(entry) = read_dir.next_entry().await? {
            let file_name = entry.file_name();
            let Some(name) = file_name
                .to_str()
                .and_then(|n| n.strip_suffix(NOTE_EXTENSION))
            else {
                continue;
            };
            if name.is_empty() {
                continue;
            }

            let text = read_text(&entry.path()).await?;
            notes.push(Note {
                name: name.to_string(),
                text,
            });
        }

        Ok(notes)
    }

    pub async fn get(&self, name: &str) -> Result<String, NoteError> {
        let path = self.note_path(name)?;
        if !self.exists(name).await {
            return Err(NoteError::NotFound);
        }
        read_text(&path).await.map_err(not_found_or_internal)
    }

    /// Write a new note. Fails with `Conflict` if the file is already there;
    /// the exclusive open means two racing creators cannot both win.
    pub async fn create(&self, name: &str, text: &str) -> Result<(), NoteError> {
        let path = self.note_path(name)?;
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(NoteError::Conflict);
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        log::debug!("Created note '{}'", name);
        Ok(())
    }

    /// Replace the content of an existing note
    pub async fn update(&self, name: &str, text: &str) -> Result<(), NoteError> {
        let path = self.note_path(name)?;
        if !self.exists(name).await {
            return Err(NoteError::NotFound);
        }
        fs::write(&path, text).await?;
        log::debug!("Updated note '{}'", name);
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> Result<(), NoteError> {
        let path = self.note_path(name)?;
        if !self.exists(name).await {
            return Err(NoteError::NotFound);
        }
        fs::remove_file(&path).await.map_err(not_found_or_internal)?;
        log::debug!("Deleted note '{}'", name);
        Ok(())
    }
}

/// Read a note file; invalid UTF-8 is replaced rather than rejected
async fn read_text(path: &Path) -> io::Result<String> {
    let raw = fs::read(path).await?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

// The file can vanish between the existence check and the operation.
fn not_found_or_internal(e: io::Error) -> NoteError {
    if e.kind() == io::ErrorKind::NotFound {
        NoteError::NotFound
    } else {
        NoteError::Internal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("foo").is_ok());
        assert!(validate_name("my note.v2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("../secret").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());

        store.create("foo", "hello").await.unwrap();
        assert_eq!(store.get("foo").await.unwrap(), "hello");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("foo.txt")).unwrap(),
            "hello"
        );
    }

    #[tokio::test]
    async fn test_create_existing_is_conflict() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());

        store.create("foo", "original").await.unwrap();
        let err = store.create("foo", "replacement").await.unwrap_err();
        assert!(matches!(err, NoteError::Conflict));
        assert_eq!(store.get("foo").await.unwrap(), "original");
    }

    #[tokio::test]
    async fn test_update_replaces_content() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());

        store.create("foo", "a much longer first version").await.unwrap();
        store.update("foo", "short").await.unwrap();
        assert_eq!(store.get("foo").await.unwrap(), "short");
    }

    #[tokio::test]
    async fn test_missing_note_is_not_found() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());

        assert!(matches!(store.get("nope").await, Err(NoteError::NotFound)));
        assert!(matches!(
            store.update("nope", "x").await,
            Err(NoteError::NotFound)
        ));
        assert!(matches!(store.delete("nope").await, Err(NoteError::NotFound)));
        assert!(!dir.path().join("nope.txt").exists());
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());

        store.create("foo", "bye").await.unwrap();
        assert!(store.exists("foo").await);
        store.delete("foo").await.unwrap();
        assert!(!store.exists("foo").await);
        assert!(matches!(store.get("foo").await, Err(NoteError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_only_txt_files() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());

        std::fs::write(dir.path().join("one.txt"), "first").unwrap();
        std::fs::write(dir.path().join("two.txt"), "second").unwrap();
        std::fs::write(dir.path().join("image.png"), "binary").unwrap();
        std::fs::write(dir.path().join("readme.md"), "# hi").unwrap();

        let mut notes = store.list().await.unwrap();
        notes.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            notes,
            vec![
                Note {
                    name: "one".to_string(),
                    text: "first".to_string()
                },
                Note {
                    name: "two".to_string(),
                    text: "second".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_empty_dir() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_missing_dir_is_internal() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("absent"));
        assert!(matches!(store.list().await, Err(NoteError::Internal(_))));
    }

    #[tokio::test]
    async fn test_traversal_names_rejected() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("cache");
        std::fs::create_dir(&cache).unwrap();
        std::fs::write(dir.path().join("outside.txt"), "secret").unwrap();
        let store = NoteStore::new(&cache);

        assert!(!store.exists("../outside").await);
        assert!(matches!(
            store.get("../outside").await,
            Err(NoteError::InvalidName)
        ));
        assert!(matches!(
            store.delete("../outside").await,
            Err(NoteError::InvalidName)
        ));
        assert!(matches!(
            store.create("../escape", "x").await,
            Err(NoteError::InvalidName)
        ));
        assert!(dir.path().join("outside.txt").exists());
        assert!(!dir.path().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn test_non_utf8_note_is_read_lossily() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path());

        std::fs::write(dir.path().join("latin1.txt"), [0x63, 0x61, 0x66, 0xE9]).unwrap();
        std::fs::write(dir.path().join("plain.txt"), "fine").unwrap();

        assert_eq!(store.get("latin1").await.unwrap(), "caf\u{FFFD}");

        let mut notes = store.list().await.unwrap();
        notes.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "caf\u{FFFD}");
        assert_eq!(notes[1].text, "fine");
    }

    #[tokio::test]
    async fn test_exists_false_on_any_access_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        // Paths beneath a regular file fail with ENOTDIR, not NotFound
        let store = NoteStore::new(&blocker);

        assert!(!store.exists("foo").await);
        assert!(matches!(store.get("foo").await, Err(NoteError::NotFound)));
    }

    #[tokio::test]
    async fn test_ensure_cache_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("cache");
        let store = NoteStore::new(&nested);

        store.ensure_cache_dir().await.unwrap();
        assert!(nested.is_dir());
        // Second call on an existing directory is a no-op
        store.ensure_cache_dir().await.unwrap();
    }
}
