//! Interactive state around a labeling session: key handling, prompts and the
//! status line. Holds no terminal handles so it can be driven headless.

use crate::viewer::{ImageViewer, SystemViewer};
use labeler_core::images::{ImageLocator, ImageStatus};
use labeler_core::keymap::{Key, KeyMap};
use labeler_core::session::{FlushReport, LabelingSession, Outcome};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Comment,
    Goto,
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::Comment => "Enter your comment",
            PromptKind::Goto => "Enter record number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Prompt(Prompt),
}

pub struct App {
    pub session: LabelingSession,
    pub keymap: KeyMap,
    pub locator: ImageLocator,
    pub mode: Mode,
    pub status: Option<String>,
    pub should_quit: bool,
    viewer: Box<dyn ImageViewer>,
}

impl App {
    pub fn new(session: LabelingSession, keymap: KeyMap, locator: ImageLocator) -> Self {
        Self {
            session,
            keymap,
            locator,
            mode: Mode::Normal,
            status: None,
            should_quit: false,
            viewer: Box::new(SystemViewer::default()),
        }
    }

    pub fn with_viewer(mut self, viewer: Box<dyn ImageViewer>) -> Self {
        self.viewer = viewer;
        self
    }

    pub fn image(&self) -> ImageStatus {
        let status = self.locator.resolve(&self.session.current().filename);
        if !status.is_found() {
            debug!(path = %status.path().display(), "image not found");
        }
        status
    }

    pub fn handle_key(&mut self, key: Key) {
        match self.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Prompt(_) => self.handle_prompt(key),
        }
    }

    fn handle_normal(&mut self, key: Key) {
        let Some(binding) = self.keymap.lookup(&key).cloned() else {
            return;
        };
        self.status = None;
        match self.session.apply(&binding) {
            Outcome::Continue => {}
            Outcome::Quit => self.should_quit = true,
            Outcome::NeedsComment => self.open_prompt(PromptKind::Comment),
            Outcome::NeedsGoto => self.open_prompt(PromptKind::Goto),
            Outcome::SaveRequested => {
                if self.backup().is_none() && self.status.is_none() {
                    self.status = Some("Nothing to save".to_string());
                }
            }
            Outcome::ViewRequested => self.view_image(),
        }
    }

    fn view_image(&mut self) {
        let message = match self.image() {
            ImageStatus::Found(path) => match self.viewer.show(&path) {
                Ok(()) => format!("Opened {}", path.display()),
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "viewer failed");
                    format!("Could not open viewer: {e}")
                }
            },
            ImageStatus::NotFound(path) => format!("File not found: {}", path.display()),
        };
        self.status = Some(message);
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        self.mode = Mode::Prompt(Prompt {
            kind,
            buffer: String::new(),
        });
    }

    fn handle_prompt(&mut self, key: Key) {
        let Mode::Prompt(prompt) = &mut self.mode else {
            return;
        };
        match key {
            Key::Char(c) => {
                if prompt.kind == PromptKind::Comment || c.is_ascii_digit() {
                    prompt.buffer.push(c);
                }
            }
            Key::Backspace => {
                prompt.buffer.pop();
            }
            Key::Esc => {
                let kind = prompt.kind;
                self.mode = Mode::Normal;
                if kind == PromptKind::Comment {
                    self.session.append_comment(None);
                }
            }
            Key::Enter => {
                let prompt = prompt.clone();
                self.mode = Mode::Normal;
                self.submit(prompt);
            }
            _ => {}
        }
    }

    fn submit(&mut self, prompt: Prompt) {
        match prompt.kind {
            PromptKind::Comment => {
                self.session.append_comment(Some(&prompt.buffer));
            }
            PromptKind::Goto => match prompt.buffer.parse::<usize>() {
                Ok(index) => {
                    if let Err(e) = self.session.goto(index) {
                        self.status = Some(e.to_string());
                    }
                }
                Err(_) => self.status = Some("Enter a record number".to_string()),
            },
        }
    }

    /// Flushes the session and reports the outcome on the status line.
    pub fn backup(&mut self) -> Option<FlushReport> {
        match self.session.flush() {
            Ok(Some(report)) => {
                let message = format!(
                    "Backed up {} records at {}",
                    report.records,
                    report.at.format("%d/%m/%Y %H:%M:%S")
                );
                info!("{message}");
                self.status = Some(message);
                Some(report)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "backup failed");
                self.status = Some(format!("Backup failed: {e}"));
                None
            }
        }
    }
}
