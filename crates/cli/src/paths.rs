use labeler_core::records;
use labeler_core::settings::SettingsStore;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Appends `.csv` unless the name already mentions it.
pub fn with_csv_extension(name: &str) -> String {
    if name.contains(".csv") {
        name.to_string()
    } else {
        format!("{name}.csv")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLocation {
    pub dir: PathBuf,
    pub file_name: String,
}

impl ListLocation {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn root_name(&self) -> String {
        records::root_name(&self.file_name)
    }
}

/// Directory precedence: explicit argument, a directory in the file argument,
/// the remembered directory, then the current directory.
pub fn resolve_list(file: &str, dir: Option<&Path>, settings: &dyn SettingsStore) -> ListLocation {
    let name = with_csv_extension(file);
    let joined = match dir {
        Some(d) => d.join(&name),
        None => {
            let candidate = PathBuf::from(&name);
            let has_parent = candidate
                .parent()
                .map(|p| !p.as_os_str().is_empty())
                .unwrap_or(false);
            if has_parent || candidate.is_absolute() {
                candidate
            } else {
                let remembered = match settings.last_dir() {
                    Ok(d) => d,
                    Err(e) => {
                        warn!(error = %e, "could not read remembered directory");
                        None
                    }
                };
                remembered.unwrap_or_else(|| PathBuf::from(".")).join(&name)
            }
        }
    };
    let file_name = joined
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(name);
    let dir = joined
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    ListLocation { dir, file_name }
}
