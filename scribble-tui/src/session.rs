use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Credentials for talking to the site as a logged-in user: the Django
/// session cookie, the CSRF token sent on mutating requests, and the
/// viewer's user id for ownership checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub session_cookie: String,
    pub csrf_token: String,
    #[serde(default)]
    pub viewer_id: Option<i64>,
}

/// Manages credential storage in the user's home directory.
///
/// Credentials are stored in `~/.scribble/credentials` with 0600 permissions
/// so only the owner can read them.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    file_path: PathBuf,
}

impl CredentialStore {
    /// Creates a new store with the default path `~/.scribble/credentials`.
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        let dir = home_dir.join(".scribble");
        let file_path = dir.join("credentials");
        Ok(Self { file_path })
    }

    /// Loads credentials from the file.
    ///
    /// - `Ok(Some(credentials))` if the file exists and parses
    /// - `Ok(None)` if the file doesn't exist or is corrupted
    pub fn load(&self) -> Result<Option<Credentials>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path)
            .context("Failed to read credentials file")?;

        if content.trim().is_empty() {
            log::warn!("Credentials file is empty, treating as logged out");
            return Ok(None);
        }

        let creds: Credentials = match serde_json::from_str(content.trim()) {
            Ok(creds) => creds,
            Err(e) => {
                log::warn!("Credentials file is corrupted ({}), treating as logged out", e);
                return Ok(None);
            }
        };

        // Tokens never contain control characters; anything else is a
        // corrupted or tampered file.
        let suspect = |s: &str| s.chars().any(|c| c.is_control()) || s.len() > 4096;
        if suspect(&creds.session_cookie) || suspect(&creds.csrf_token) {
            log::warn!("Credentials file contains invalid data, treating as logged out");
            return Ok(None);
        }

        log::debug!("Loaded credentials from {}", self.file_path.display());
        Ok(Some(creds))
    }

    /// Saves credentials with 0600 permissions.
    ///
    /// Uses an atomic write (temp file + rename) to prevent partial writes.
    pub fn save(&self, creds: &Credentials) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).context("Failed to create .scribble directory")?;
        }

        self.cleanup_stale_files()?;

        let temp_path = self.file_path.with_extension("tmp");
        let json = serde_json::to_string_pretty(creds).context("Failed to serialize credentials")?;

        let mut file =
            fs::File::create(&temp_path).context("Failed to create temporary credentials file")?;
        file.write_all(json.as_bytes())
            .context("Failed to write credentials")?;
        file.sync_all()
            .context("Failed to sync credentials file to disk")?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&temp_path, permissions)
                .context("Failed to set credentials file permissions")?;
        }

        fs::rename(&temp_path, &self.file_path)
            .context("Failed to rename temporary credentials file")?;

        log::info!("Saved credentials to {}", self.file_path.display());
        Ok(())
    }

    /// Deletes the credentials file. Succeeds even if it doesn't exist.
    pub fn delete(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path).context("Failed to delete credentials file")?;
            log::info!("Deleted credentials file at {}", self.file_path.display());
        }
        Ok(())
    }

    /// Removes leftover temp/backup files from interrupted writes.
    fn cleanup_stale_files(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                return Ok(());
            }
            for entry in fs::read_dir(parent).context("Failed to read .scribble directory")? {
                let path = entry?.path();
                if path == self.file_path {
                    continue;
                }
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if name.starts_with("credentials.") {
                        if let Err(e) = fs::remove_file(&path) {
                            log::warn!("Failed to remove stale file {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }
}
