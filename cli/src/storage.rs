//! Token persistence for the command line: one file holding the raw token.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use session::{MemoryStorage, StorageError, TokenStorage};

/// File-backed [`TokenStorage`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileStorage {
    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw.trim().to_owned()).filter(|token| !token.is_empty()),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "unreadable token file: {err}");
                None
            }
        }
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value)?;
        restrict_permissions(&self.path)?;
        tracing::debug!(path = %self.path().display(), "token saved");
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Where the CLI keeps its token for this invocation.
///
/// `Fixed` holds a token passed through the environment; it lives only as long
/// as the process and never touches the file.
#[derive(Debug)]
pub enum CliStorage {
    File(FileStorage),
    Fixed(MemoryStorage),
}

impl CliStorage {
    pub fn resolve(token: Option<String>, file: PathBuf) -> Self {
        match token.filter(|token| !token.trim().is_empty()) {
            Some(token) => Self::Fixed(MemoryStorage::with_value(token.trim())),
            None => Self::File(FileStorage::new(file)),
        }
    }
}

impl TokenStorage for CliStorage {
    fn read(&self) -> Option<String> {
        match self {
            Self::File(file) => file.read(),
            Self::Fixed(memory) => memory.read(),
        }
    }

    fn write(&self, value: &str) -> Result<(), StorageError> {
        match self {
            Self::File(file) => file.write(value),
            Self::Fixed(memory) => memory.write(value),
        }
    }

    fn remove(&self) -> Result<(), StorageError> {
        match self {
            Self::File(file) => file.remove(),
            Self::Fixed(memory) => memory.remove(),
        }
    }
}

/// `$HOME/.shortener_token`.
pub fn default_token_file() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".shortener_token"))
}
