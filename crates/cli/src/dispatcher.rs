//! Event loop: one task owns the app and reacts to key events and the backup
//! timer. Whatever ends the loop, a final backup is attempted.

use crate::app::App;
use anyhow::Result;
use labeler_core::keymap::Key;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(Key),
    Redraw,
    Interrupt,
}

pub async fn run<D>(
    app: &mut App,
    events: UnboundedReceiver<AppEvent>,
    backup_interval: Duration,
    draw: D,
) -> Result<()>
where
    D: FnMut(&App) -> Result<()>,
{
    let result = event_loop(app, events, backup_interval, draw).await;
    app.backup();
    info!(dirty = app.session.is_dirty(), "session closed");
    result
}

async fn event_loop<D>(
    app: &mut App,
    mut events: UnboundedReceiver<AppEvent>,
    backup_interval: Duration,
    mut draw: D,
) -> Result<()>
where
    D: FnMut(&App) -> Result<()>,
{
    let mut ticker = time::interval(backup_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    draw(app)?;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(AppEvent::Key(key)) => app.handle_key(key),
                Some(AppEvent::Redraw) => {}
                Some(AppEvent::Interrupt) | None => break,
            },
            _ = ticker.tick() => {
                app.backup();
            }
        }
        if app.should_quit {
            break;
        }
        draw(app)?;
    }
    Ok(())
}
