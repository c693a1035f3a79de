use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use tracing::warn;

use crate::app::{handle_input, handle_mouse, App};
use crate::ui;

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Spinner and background dataset
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Mouse(mouse)) => {
                    let size = terminal.size()?;
                    handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
                        warn!("redraw after resize failed: {e}");
                    }
                }
                Ok(Event::Key(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_)) => {}
                Err(e) => warn!("failed to read terminal event: {e}"),
            }
        }

        // Let the spawned loader make progress between frames
        tokio::task::yield_now().await;
    }
    Ok(())
}
