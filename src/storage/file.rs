use anyhow::{Context, Result};
use directories_next::BaseDirs;
use log::debug;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::ProgressStore;

const APP_DIRECTORY: &str = "quiz-trainer";

/// Stores each entry as `<directory>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: PathBuf) -> Self {
        FileStore { directory }
    }

    pub fn default_directory() -> Result<PathBuf> {
        let mut dir = BaseDirs::new()
            .context("could not locate system directories")?
            .data_dir()
            .to_path_buf();
        dir.push(APP_DIRECTORY);
        Ok(dir)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

impl ProgressStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {:?}", path)),
        }
    }

    fn save(&self, key: &str, content: &str) -> Result<()> {
        std::fs::create_dir_all(&self.directory)
            .with_context(|| format!("Could not create {:?}", self.directory))?;
        let path = self.entry_path(key);
        std::fs::write(&path, content).with_context(|| format!("Could not write {:?}", path))?;
        debug!("Wrote {} bytes to {:?}", content.len(), path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Could not delete {:?}", path)),
        }
    }
}
