use crate::app::{App, Mode};
use anyhow::Result;
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use labeler_core::images::{self, ImageStatus};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout, Write};
use std::panic;
use std::sync::Once;

/// Leaves raw mode and the alternate screen and shows the cursor again.
pub fn reset_terminal(out: &mut impl Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, Show)
}

/// Restores the terminal before the default panic message is printed.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = reset_terminal(&mut io::stdout());
            previous(info);
        }));
    });
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        install_panic_hook();
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(t) => t,
            Err(e) => {
                let _ = reset_terminal(&mut io::stdout());
                return Err(e.into());
            }
        };
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn draw(&mut self, app: &App) -> Result<()> {
        self.terminal.draw(|frame| render(frame, app))?;
        Ok(())
    }

    /// Safe to call more than once; only the first call touches the terminal.
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        reset_terminal(self.terminal.backend_mut())?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(frame.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(32)])
        .split(rows[0]);

    render_record(frame, columns[0], app);
    render_instructions(frame, columns[1], app);
    render_status(frame, rows[1], app);
}

fn render_record(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let record = session.current();
    let image = app.image();

    let category = match &image {
        ImageStatus::NotFound(_) => "File not found".to_string(),
        ImageStatus::Found(_) if !record.is_classified() => "Unclassified".to_string(),
        ImageStatus::Found(_) => record.category.clone(),
    };
    let category_style = if record.is_classified() && image.is_found() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let progress = session.progress();

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}/{}", session.cursor() + 1, session.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(category, category_style)),
        Line::from(""),
        Line::from(format!("Image: {}", image.path().display())),
    ];
    if let ImageStatus::Found(path) = &image {
        if let Some((w, h)) = images::dimensions(path) {
            lines.push(Line::from(format!("Size:  {w}x{h}")));
        }
    }
    lines.push(Line::from(format!(
        "Done:  {} of {} ({} left)",
        progress.classified,
        progress.total,
        progress.unclassified()
    )));
    if session.is_dirty() {
        lines.push(Line::from(Span::styled(
            "Unsaved changes",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", record.filename));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_instructions(frame: &mut Frame, area: Rect, app: &App) {
    let help = app
        .keymap
        .help_lines(app.session.has_previous(), app.session.has_next());
    let lines: Vec<Line> = help
        .into_iter()
        .map(|h| {
            Line::from(vec![
                Span::styled(format!("{:<8}", h.key), Style::default().fg(Color::Cyan)),
                Span::raw(h.action),
            ])
        })
        .collect();
    let block = Block::default().borders(Borders::ALL).title(" Keys ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (title, text) = match &app.mode {
        Mode::Prompt(prompt) => (
            format!(" {} (Enter to accept, Esc to cancel) ", prompt.kind.title()),
            format!("{}_", prompt.buffer),
        ),
        Mode::Normal => (
            " Status ".to_string(),
            app.status.clone().unwrap_or_default(),
        ),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(text).block(block), area);
}
