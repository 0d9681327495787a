use labeler_core::config::{self, AppConfig, DEFAULT_BACKUP_INTERVAL_SECS};
use labeler_core::keymap::{Binding, Key};
use std::fs;
use std::time::Duration;

#[test]
fn defaults_match_original_tool() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.backup.interval_secs, DEFAULT_BACKUP_INTERVAL_SECS);
    assert_eq!(cfg.backup_interval(), Duration::from_secs(300));
    assert_eq!(cfg.images.extensions, vec!["gif".to_string()]);
    assert_eq!(cfg.images.viewer, None);
    assert!(cfg.keymap.is_empty());
}

#[test]
fn file_overrides_are_applied() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("labeler.toml");
    fs::write(
        &path,
        r#"
[backup]
interval_secs = 60

[images]
extensions = ["png", "gif"]

[keymap]
x = "label:Artifact"
"#,
    )
    .unwrap();
    let cfg = config::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(cfg.backup_interval(), Duration::from_secs(60));
    assert_eq!(cfg.backup.dir, None);
    assert_eq!(cfg.images.extensions, vec!["png".to_string(), "gif".to_string()]);
    let keymap = cfg.keymap().unwrap();
    assert_eq!(keymap.lookup(&Key::Char('x')), Some(&Binding::Label("Artifact".into())));
    assert_eq!(keymap.lookup(&Key::Char('q')), Some(&Binding::Quit));
}

#[test]
fn zero_interval_is_clamped() {
    let mut cfg = AppConfig::default();
    cfg.backup.interval_secs = 0;
    assert_eq!(cfg.backup_interval(), Duration::from_secs(1));
}
