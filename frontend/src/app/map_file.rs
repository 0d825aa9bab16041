use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// The on-disk copy of the map currently on screen.
///
/// Every fetch overwrites the same file. It is removed when the viewer is
/// done with it, or at the latest when this value is dropped.
pub struct MapImageFile {
    path: PathBuf,
}

impl MapImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, bytes: &[u8]) -> Result<()> {
        fs::write(&self.path, bytes).with_context(|| format!("Failed to write map image to {:?}", self.path))?;
        debug!("Stored {} bytes in {:?}", bytes.len(), self.path);
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).with_context(|| format!("Failed to read map image from {:?}", self.path))
    }

    /// Delete the file. A file that is already gone is not an error.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed map image {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove map image {:?}", self.path)),
        }
    }
}

impl Drop for MapImageFile {
    fn drop(&mut self) {
        if let Err(e) = self.remove() {
            error!("{:#}", e);
        }
    }
}
