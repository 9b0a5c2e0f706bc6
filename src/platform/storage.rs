//! Concrete progress stores
//!
//! - Native: a JSON file, written to a temp file and renamed into place
//! - Web: a LocalStorage entry

use crate::persistence::{ProgressStore, StoreError};

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use super::{ProgressStore, StoreError};

    /// Progress kept in a file on disk
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl ProgressStore for FileStore {
        fn read(&self) -> Result<Option<String>, StoreError> {
            match fs::read_to_string(&self.path) {
                Ok(data) => Ok(Some(data)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err.into()),
            }
        }

        fn write(&mut self, data: &str) -> Result<(), StoreError> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, data)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

}

/// Progress kept in the browser's LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(crate::persistence::STORAGE_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl ProgressStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }

    fn write(&mut self, data: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(&self.key, data)
            .map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }
}
