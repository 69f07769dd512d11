//! Token persistence in a plain file under the user's config directory

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use shiftline_core::TokenStore;
use shiftline_domain::{Result, SessionConfig, ShiftlineError};
use tracing::debug;

use crate::errors::InfraError;

const APP_DIR: &str = "shiftline";
const TOKEN_FILE: &str = "session.token";

/// Stores the session token in a single file.
///
/// On Unix the file is created readable by the owner only.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, or `<config dir>/shiftline/session.token`.
    ///
    /// # Errors
    /// `Storage` when no path is configured and the platform has no config
    /// directory.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        match config.token_path.as_deref() {
            Some(path) => Ok(Self::new(expand_tilde(path))),
            None => Self::default_path().map(Self::new),
        }
    }

    /// `<config dir>/shiftline/session.token`
    ///
    /// # Errors
    /// `Storage` when the platform has no config directory.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(TOKEN_FILE))
            .ok_or_else(|| ShiftlineError::Storage("no config directory on this platform".into()))
    }

    /// Location of the token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(InfraError::from)?;
        }
        let mut file = open_private(&self.path).map_err(InfraError::from)?;
        // An existing file keeps its old mode on open
        restrict_permissions(&self.path)?;
        file.write_all(token.as_bytes()).map_err(InfraError::from)?;
        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session token removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

/// Open for writing, truncated; a new file is created owner-only on Unix.
fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(InfraError::from)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
