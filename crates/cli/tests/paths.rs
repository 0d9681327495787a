use labeler_cli::paths::{resolve_list, with_csv_extension, ListLocation};
use labeler_core::settings::MemorySettings;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

#[test]
fn csv_extension_is_added_once() {
    assert_eq!(with_csv_extension("survey"), "survey.csv");
    assert_eq!(with_csv_extension("survey.csv"), "survey.csv");
}

#[test]
fn explicit_directory_wins() {
    let settings = MemorySettings::with_dir("/remembered");
    let loc = resolve_list("survey", Some(Path::new("/data")), &settings);
    assert_eq!(
        loc,
        ListLocation {
            dir: PathBuf::from("/data"),
            file_name: "survey.csv".to_string(),
        }
    );
    assert_eq!(loc.path(), PathBuf::from("/data/survey.csv"));
}

#[test]
fn directory_in_file_argument_is_used() {
    let settings = MemorySettings::with_dir("/remembered");
    let loc = resolve_list("runs/survey_20240518_101500.csv", None, &settings);
    assert_eq!(loc.dir, PathBuf::from("runs"));
    assert_eq!(loc.file_name, "survey_20240518_101500.csv");
    assert_eq!(loc.root_name(), "survey");
}

#[test]
fn remembered_then_current_directory() {
    let remembered = MemorySettings::with_dir("/remembered");
    assert_eq!(resolve_list("survey", None, &remembered).dir, PathBuf::from("/remembered"));

    let empty = MemorySettings::default();
    assert_eq!(resolve_list("survey", None, &empty).dir, PathBuf::from("."));
}
