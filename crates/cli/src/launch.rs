//! Builds a ready-to-run [`App`] from configuration and command-line input.

use crate::app::App;
use crate::paths;
use crate::viewer::SystemViewer;
use anyhow::{Context, Result};
use labeler_core::config::AppConfig;
use labeler_core::images::ImageLocator;
use labeler_core::records;
use labeler_core::session::LabelingSession;
use labeler_core::settings::SettingsStore;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct LabelArgs {
    pub file: String,
    pub path: Option<PathBuf>,
    pub images: Option<PathBuf>,
    pub interval: Option<u64>,
}

pub struct LabelRun {
    pub app: App,
    pub backup_interval: Duration,
    pub list_path: PathBuf,
}

/// Loads the record list and builds the session around it. The directory is
/// only remembered once the list has been read.
pub fn prepare(
    cfg: &AppConfig,
    args: &LabelArgs,
    settings: &mut dyn SettingsStore,
) -> Result<LabelRun> {
    let location = paths::resolve_list(&args.file, args.path.as_deref(), &*settings);
    let list_path = location.path();
    let loaded = records::read_records(&list_path)
        .with_context(|| format!("load {}", list_path.display()))?;
    info!("{} records read from {}", loaded.len(), list_path.display());

    let list_dir = fs::canonicalize(&location.dir).unwrap_or_else(|_| location.dir.clone());
    if let Err(e) = settings.remember_dir(&list_dir) {
        warn!(error = %e, "could not remember directory");
    }

    let storage_dir = cfg
        .backup
        .dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| list_dir.clone());
    let image_dir = args
        .images
        .clone()
        .or_else(|| cfg.images.dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| list_dir.clone());
    let backup_interval = args
        .interval
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(|| cfg.backup_interval());

    let session = LabelingSession::load(loaded, location.root_name(), storage_dir)
        .with_context(|| format!("start session for {}", list_path.display()))?;
    let keymap = cfg.keymap().context("keymap configuration")?;
    let locator = ImageLocator::new(image_dir, &cfg.images.extensions);
    let viewer = SystemViewer::new(cfg.images.viewer.clone());
    let app = App::new(session, keymap, locator).with_viewer(Box::new(viewer));

    Ok(LabelRun {
        app,
        backup_interval,
        list_path,
    })
}
