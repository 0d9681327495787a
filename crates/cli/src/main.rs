use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use labeler_cli::launch::{self, LabelArgs, LabelRun};
use labeler_cli::logging::{self, LogTarget};
use labeler_cli::{dispatcher, input, paths, status, tui::Tui};
use labeler_core::config::{self, AppConfig, APP_NAME};
use labeler_core::records;
use labeler_core::settings::FileSettings;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Label {
            file,
            path,
            images,
            interval,
        } => {
            let target = match cli.log_file {
                Some(p) => LogTarget::File(p),
                None => LogTarget::Discard,
            };
            let _guard = logging::init(target)?;
            let args = LabelArgs {
                file,
                path,
                images,
                interval,
            };
            run_label(cfg, args).await
        }
        Commands::Status { file, path, json } => {
            let target = match cli.log_file {
                Some(p) => LogTarget::File(p),
                None => LogTarget::Stderr,
            };
            let _guard = logging::init(target)?;
            run_status(cfg, &file, path, json)
        }
    }
}

#[derive(Parser)]
#[command(name = "labeler")]
#[command(about = "Page through image files and label each one", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label records interactively
    Label {
        /// Record list (.csv is appended when missing)
        file: String,
        /// Directory holding the list; defaults to the last one used
        path: Option<PathBuf>,
        /// Directory holding the images; defaults to the list directory
        #[arg(long)]
        images: Option<PathBuf>,
        /// Seconds between automatic backups
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Show labeling progress for a record list
    Status {
        /// Record list (.csv is appended when missing)
        file: String,
        /// Directory holding the list; defaults to the last one used
        path: Option<PathBuf>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

fn settings_store(cfg: &AppConfig) -> Result<FileSettings> {
    match &cfg.settings.default_path_file {
        Some(p) => Ok(FileSettings::new(p)),
        None => FileSettings::default_location(APP_NAME).context("locate settings file"),
    }
}

async fn run_label(cfg: AppConfig, args: LabelArgs) -> Result<()> {
    let mut settings = settings_store(&cfg)?;
    debug!(path = %settings.path().display(), "settings file");
    let LabelRun {
        mut app,
        backup_interval,
        list_path,
    } = launch::prepare(&cfg, &args, &mut settings)?;
    debug!(list = %list_path.display(), root = app.session.root_name(), "session ready");

    let (tx, rx) = mpsc::unbounded_channel();
    let mut tui = Tui::new()?;
    input::spawn_reader(tx);
    let result = dispatcher::run(&mut app, rx, backup_interval, |app| tui.draw(app)).await;
    let restored = tui.restore();

    if let Some(message) = app.status.as_deref() {
        println!("{message}");
    }
    result?;
    restored?;
    Ok(())
}

fn run_status(cfg: AppConfig, file: &str, path: Option<PathBuf>, json: bool) -> Result<()> {
    let settings = settings_store(&cfg)?;
    let location = paths::resolve_list(file, path.as_deref(), &settings);
    let list_path = location.path();
    let loaded = records::read_records(&list_path)
        .with_context(|| format!("load {}", list_path.display()))?;
    let summary = status::summarize(&location.file_name, &loaded);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", status::render_text(&summary));
    }
    Ok(())
}
