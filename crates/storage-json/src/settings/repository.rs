use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::errors::{IntoCore, JsonStorageError};
use calcae_core::constants::SETTINGS_FILE_NAME;
use calcae_core::errors::Result;
use calcae_core::settings::RateConfigurationRepositoryTrait;
use calcae_core::{RateConfiguration, RateConfigurationUpdate};

/// Stores the rate configuration as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonRateConfigurationRepository {
    path: PathBuf,
}

impl JsonRateConfigurationRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonRateConfigurationRepository { path: path.into() }
    }

    /// Repository for `settings.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_document(
    path: &Path,
) -> std::result::Result<Option<RateConfigurationUpdate>, JsonStorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No settings file at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(JsonStorageError::read(path, e)),
    };

    if raw.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| JsonStorageError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes next to the target then renames over it, so readers see either
/// the old document or the new one.
fn write_document(path: &Path, contents: &[u8]) -> std::result::Result<(), JsonStorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| JsonStorageError::write(parent, e))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut file =
        fs::File::create(&tmp_path).map_err(|e| JsonStorageError::write(&tmp_path, e))?;
    file.write_all(contents)
        .and_then(|_| file.sync_all())
        .map_err(|e| JsonStorageError::write(&tmp_path, e))?;
    drop(file);

    fs::rename(&tmp_path, path).map_err(|e| JsonStorageError::write(path, e))
}

#[async_trait]
impl RateConfigurationRepositoryTrait for JsonRateConfigurationRepository {
    fn load(&self) -> Result<Option<RateConfigurationUpdate>> {
        read_document(&self.path).into_core()
    }

    async fn save(&self, config: &RateConfiguration) -> Result<()> {
        let mut contents = serde_json::to_vec_pretty(config)
            .map_err(JsonStorageError::from)
            .into_core()?;
        contents.push(b'\n');

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_document(&path, &contents))
            .await
            .map_err(JsonStorageError::from)
            .into_core()?
            .into_core()?;

        debug!("Rate configuration saved to {}", self.path.display());
        Ok(())
    }
}
