//! Kept in its own test binary: it mutates the process environment.

use labeler_core::config;
use std::fs;
use std::time::Duration;

#[test]
fn environment_overrides_file_values() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("labeler.toml");
    fs::write(
        &path,
        r#"
[backup]
interval_secs = 60

[images]
viewer = "feh"
"#,
    )
    .unwrap();

    std::env::set_var("LABELER__BACKUP__INTERVAL_SECS", "45");
    let cfg = config::load(Some(path.to_str().unwrap()));
    std::env::remove_var("LABELER__BACKUP__INTERVAL_SECS");

    let cfg = cfg.unwrap();
    assert_eq!(cfg.backup_interval(), Duration::from_secs(45));
    assert_eq!(cfg.images.viewer.as_deref(), Some("feh"));
}
