use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no home directory available")]
    NoHome,
    #[error("settings io error: {0}")]
    Io(#[from] io::Error),
}

/// Remembers the directory the operator last worked in.
pub trait SettingsStore {
    fn last_dir(&self) -> Result<Option<PathBuf>, SettingsError>;
    fn remember_dir(&mut self, dir: &Path) -> Result<(), SettingsError>;
}

/// Single-line text file holding the last used directory.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.<app_name>.def`
    pub fn default_location(app_name: &str) -> Result<Self, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::NoHome)?;
        Ok(Self::new(home.join(format!(".{app_name}.def"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettings {
    fn last_dir(&self) -> Result<Option<PathBuf>, SettingsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let line = content.lines().next().unwrap_or_default().trim();
        if line.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(line)))
        }
    }

    fn remember_dir(&mut self, dir: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, dir.to_string_lossy().as_bytes())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    dir: Option<PathBuf>,
}

impl MemorySettings {
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn last_dir(&self) -> Result<Option<PathBuf>, SettingsError> {
        Ok(self.dir.clone())
    }

    fn remember_dir(&mut self, dir: &Path) -> Result<(), SettingsError> {
        self.dir = Some(dir.to_path_buf());
        Ok(())
    }
}
