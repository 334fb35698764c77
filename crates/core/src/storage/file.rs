use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use super::traits::Persistence;
use crate::errors::CoreError;

/// Slot backed by a JSON file: `<data_dir>/<key>.json`.
///
/// Writes go to `<key>.json.tmp` first and are renamed over the real file,
/// so the slot always holds either the old or the new document.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
    tmp_path: PathBuf,
}

impl FilePersistence {
    /// Create a slot named `key` inside `data_dir`. The directory is created
    /// lazily on first write.
    pub fn new(data_dir: impl AsRef<Path>, key: &str) -> Self {
        let dir = data_dir.as_ref();
        Self {
            path: dir.join(format!("{key}.json")),
            tmp_path: dir.join(format!("{key}.json.tmp")),
        }
    }

    /// Path of the document on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for FilePersistence {
    fn read(&self) -> Result<Option<String>, CoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, document), fields(path = %self.path.display()))]
    fn write(&self, document: &str) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.tmp_path, document)?;
        std::fs::rename(&self.tmp_path, &self.path)?;
        debug!(bytes = document.len(), "Portfolio document written");
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
