use labeler_cli::app::App;
use labeler_cli::dispatcher::{self, AppEvent};
use labeler_core::images::ImageLocator;
use labeler_core::keymap::{Key, KeyMap};
use labeler_core::models::Record;
use labeler_core::records::read_records;
use labeler_core::session::LabelingSession;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

fn app_in(dir: &Path, names: &[&str]) -> App {
    let records = names.iter().map(|n| Record::unclassified(*n)).collect();
    let session = LabelingSession::load(records, "batch", dir).unwrap();
    App::new(session, KeyMap::default(), ImageLocator::new(dir, &[]))
}

fn backups(dir: &Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}

#[tokio::test]
async fn closing_the_channel_flushes_pending_labels() {
    let temp = tempfile::tempdir().unwrap();
    let mut app = app_in(temp.path(), &["a.png", "b.png"]);
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(AppEvent::Key(Key::Enter)).unwrap();
    tx.send(AppEvent::Key(Key::Char('z'))).unwrap();
    drop(tx);

    let mut draws = 0;
    dispatcher::run(&mut app, rx, Duration::from_secs(300), |_| {
        draws += 1;
        Ok(())
    })
    .await
    .unwrap();

    assert!(draws >= 2);
    assert!(!app.session.is_dirty());
    let files = backups(temp.path());
    assert_eq!(files.len(), 1);
    let saved = read_records(&files[0]).unwrap();
    assert_eq!(saved[0].category, "Correct");
    assert_eq!(saved[1].category, "DZ");
}

#[tokio::test]
async fn quit_key_ends_loop_without_writing_a_clean_session() {
    let temp = tempfile::tempdir().unwrap();
    let mut app = app_in(temp.path(), &["a.png"]);
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(AppEvent::Key(Key::Char('q'))).unwrap();

    dispatcher::run(&mut app, rx, Duration::from_secs(300), |_| Ok(()))
        .await
        .unwrap();

    assert!(app.should_quit);
    assert!(backups(temp.path()).is_empty());
    drop(tx);
}

#[tokio::test(start_paused = true)]
async fn timer_backs_up_dirty_session() {
    let temp = tempfile::tempdir().unwrap();
    let mut app = app_in(temp.path(), &["a.png", "b.png"]);
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(AppEvent::Key(Key::Char('a'))).unwrap();

    let quitter = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(90)).await;
        tx.send(AppEvent::Key(Key::Char('q'))).unwrap();
    });

    let mut saw_backup = false;
    dispatcher::run(&mut app, rx, Duration::from_secs(60), |app| {
        if app
            .status
            .as_deref()
            .is_some_and(|s| s.starts_with("Backed up 2 records"))
        {
            saw_backup = true;
        }
        Ok(())
    })
    .await
    .unwrap();
    quitter.await.unwrap();

    assert!(saw_backup);
    assert!(!app.session.is_dirty());
    assert_eq!(backups(temp.path()).len(), 1);
}

#[tokio::test]
async fn draw_failure_still_flushes() {
    let temp = tempfile::tempdir().unwrap();
    let mut app = app_in(temp.path(), &["a.png"]);
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(AppEvent::Key(Key::Char('b'))).unwrap();

    let mut calls = 0;
    let result = dispatcher::run(&mut app, rx, Duration::from_secs(300), |_| {
        calls += 1;
        if calls > 1 {
            anyhow::bail!("terminal gone");
        }
        Ok(())
    })
    .await;

    assert!(result.is_err());
    assert_eq!(backups(temp.path()).len(), 1);
    drop(tx);
}
