//! Application layer: the workbench and the terminal event loop.

pub mod theme;
pub mod workbench;

use std::io;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::core::event::InputEvent;
use crate::kernel::services::ports::Settings;
use crate::tui::terminal_guard::{TerminalGuard, Termination};

pub use theme::UiTheme;
pub use workbench::{Outcome, Workbench};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// How long the signal thread waits for the loop to persist the session before exiting.
const SIGNAL_GRACE: Duration = Duration::from_secs(2);

/// Run the editor until the user quits or a termination signal arrives, then persist
/// the open-file session. A persistence failure is reported on stderr after the
/// terminal is restored; it does not change the exit status.
pub fn run(settings: &Settings, folder: Option<&Path>) -> io::Result<()> {
    let mut workbench = Workbench::new(settings, folder);

    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel::<Termination>();
    #[cfg(unix)]
    let _signals = crate::tui::terminal_guard::forward_termination(
        guard.restorer(),
        signal_tx,
        SIGNAL_GRACE,
    )?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut workbench, &signal_rx);
    if let Err(err) = &result {
        tracing::error!(error = %err, "event loop failed");
    }

    let persisted = workbench.shutdown();
    drop(terminal);
    drop(guard);

    if !persisted {
        if let Some(message) = workbench.message() {
            eprintln!("slate: {message}");
        }
    }
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    workbench: &mut Workbench,
    signals: &Receiver<Termination>,
) -> io::Result<()> {
    let mut needs_redraw = true;
    loop {
        if let Ok(termination) = signals.try_recv() {
            tracing::info!(?termination, "termination signal received");
            return Ok(());
        }

        if needs_redraw {
            terminal.draw(|frame| {
                let area = frame.area();
                workbench.render(frame, area);
            })?;
            needs_redraw = false;
        }

        if !crossterm::event::poll(POLL_INTERVAL)? {
            continue;
        }

        let event = InputEvent::from(crossterm::event::read()?);
        match workbench.handle_input(&event) {
            Outcome::Quit => {
                tracing::info!("quit requested");
                return Ok(());
            }
            Outcome::Redraw => needs_redraw = true,
            Outcome::Unchanged => {}
        }
    }
}
