use labeler_cli::logging::{init, LogTarget};
use tracing::info;

#[test]
fn file_target_flushes_when_guard_drops() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("labeler.log");

    let guard = init(LogTarget::File(path.clone())).unwrap();
    assert!(guard.is_some());
    info!(records = 3, "backup written");
    drop(guard);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("backup written"));
    assert!(content.contains("records=3"));
    assert!(!content.contains("\x1b["));
}
