use labeler_cli::app::App;
use labeler_cli::tui::render;
use labeler_core::images::ImageLocator;
use labeler_core::keymap::{Key, KeyMap};
use labeler_core::models::Record;
use labeler_core::session::LabelingSession;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| render(frame, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn shows_progress_category_and_keys() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("b.gif"), b"GIF89a").unwrap();
    let records = vec![Record::new("a", "DA"), Record::unclassified("b")];
    let session = LabelingSession::load(records, "survey", temp.path()).unwrap();
    let mut app = App::new(
        session,
        KeyMap::default(),
        ImageLocator::new(temp.path(), &["gif".to_string()]),
    );

    let text = screen(&app);
    assert!(text.contains("2/2"));
    assert!(text.contains("Unclassified"));
    assert!(text.contains("Previous"));
    assert!(!text.contains("Next unclassified"));
    assert!(text.contains("View image"));

    app.handle_key(Key::Left);
    let text = screen(&app);
    assert!(text.contains("1/2"));
    assert!(text.contains("File not found"));

    app.handle_key(Key::Char('g'));
    let text = screen(&app);
    assert!(text.contains("Enter record number"));
}
