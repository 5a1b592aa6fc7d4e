//! File-backed credential persistence
//!
//! Writes go to a temp file first and are renamed into place.

use super::types::Credential;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Reads and writes a [`Credential`] as JSON at a fixed path
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store at the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the credential file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored credential, or `None` if there is no file
    pub fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| Error::Credentials {
            message: format!("Failed to read {}: {e}", self.path.display()),
        })?;
        let credential: Credential =
            serde_json::from_str(&contents).map_err(|e| Error::Credentials {
                message: format!("Failed to parse {}: {e}", self.path.display()),
            })?;

        if credential.access_token.is_empty() {
            return Err(Error::credentials(format!(
                "Stored credential in {} has an empty access token",
                self.path.display()
            )));
        }

        Ok(Some(credential))
    }

    /// Write the credential, replacing any previous file
    pub async fn save(&self, credential: &Credential) -> Result<()> {
        let contents = serde_json::to_string_pretty(credential).map_err(|e| Error::Credentials {
            message: format!("Failed to serialize credential: {e}"),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| Error::Credentials {
                        message: format!("Failed to create {}: {e}", parent.display()),
                    })?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::Credentials {
                message: format!("Failed to write credential file: {e}"),
            })?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::Credentials {
                message: format!("Failed to rename credential file: {e}"),
            })?;

        Ok(())
    }

    /// Delete the credential file if present
    pub async fn remove(&self) -> Result<()> {
        if self.path.exists() {
            tokio::fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}
