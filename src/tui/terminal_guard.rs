//! Terminal modes the editor turns on, and their teardown.
//!
//! Teardown can run from the guard's `Drop` or from the signal thread, whichever comes
//! first; each mode is switched off at most once.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A terminal mode entered at startup, in the order it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Raw,
    AlternateScreen,
    BracketedPaste,
    BarCursor,
}

const MODES: [Mode; 4] = [
    Mode::Raw,
    Mode::AlternateScreen,
    Mode::BracketedPaste,
    Mode::BarCursor,
];

pub trait ModeSwitch: Send + Sync + 'static {
    fn enter(&self, mode: Mode) -> io::Result<()>;
    fn leave(&self, mode: Mode) -> io::Result<()>;
}

/// Mouse capture is never enabled, so the terminal keeps native text selection.
#[derive(Debug, Default)]
pub struct CrosstermModes;

impl ModeSwitch for CrosstermModes {
    fn enter(&self, mode: Mode) -> io::Result<()> {
        use crossterm::{cursor, event, execute, terminal};

        let mut out = io::stdout();
        match mode {
            Mode::Raw => terminal::enable_raw_mode(),
            Mode::AlternateScreen => execute!(out, terminal::EnterAlternateScreen),
            Mode::BracketedPaste => execute!(out, event::EnableBracketedPaste),
            Mode::BarCursor => execute!(out, cursor::SetCursorStyle::BlinkingBar),
        }
    }

    fn leave(&self, mode: Mode) -> io::Result<()> {
        use crossterm::{cursor, event, execute, terminal};

        let mut out = io::stdout();
        match mode {
            Mode::Raw => terminal::disable_raw_mode(),
            Mode::AlternateScreen => execute!(out, terminal::LeaveAlternateScreen),
            Mode::BracketedPaste => execute!(out, event::DisableBracketedPaste),
            Mode::BarCursor => execute!(
                out,
                cursor::SetCursorStyle::DefaultUserShape,
                cursor::Show
            ),
        }
    }
}

/// Shared handle that leaves every entered mode, newest first.
#[derive(Clone)]
pub struct TerminalRestorer {
    entered: Arc<Mutex<Vec<Mode>>>,
    switch: Arc<dyn ModeSwitch>,
}

impl TerminalRestorer {
    /// Every mode is attempted even if an earlier one fails; the first error is returned.
    /// Later calls find nothing left to undo.
    pub fn restore(&self) -> io::Result<()> {
        let entered = std::mem::take(
            &mut *self
                .entered
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );

        let mut first_err = None;
        for mode in entered.into_iter().rev() {
            if let Err(err) = self.switch.leave(mode) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn is_restored(&self) -> bool {
        self.entered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_switch(Arc::new(CrosstermModes))
    }

    /// Enters every mode. If one fails, the ones already entered are left again before
    /// the error is returned.
    pub fn with_switch(switch: Arc<dyn ModeSwitch>) -> io::Result<Self> {
        let restorer = TerminalRestorer {
            entered: Arc::new(Mutex::new(Vec::with_capacity(MODES.len()))),
            switch,
        };

        for mode in MODES {
            if let Err(err) = restorer.switch.enter(mode) {
                if let Err(undo) = restorer.restore() {
                    tracing::warn!(error = %undo, "terminal rollback failed");
                }
                return Err(err);
            }
            restorer
                .entered
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(mode);
        }

        Ok(Self { restorer })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restorer.restore() {
            tracing::warn!(error = %err, "terminal restore failed");
        }
    }
}

/// SIGINT or SIGTERM, forwarded to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    signal: i32,
}

impl Termination {
    pub fn new(signal: i32) -> Self {
        Self { signal }
    }

    /// Shell convention: 128 plus the signal number.
    pub fn exit_code(self) -> i32 {
        128 + self.signal
    }
}

/// Hand SIGINT/SIGTERM to the event loop so it can persist the session. The process
/// exits `grace` later regardless, or at once if the loop is already gone.
#[cfg(unix)]
pub fn forward_termination(
    restorer: TerminalRestorer,
    tx: std::sync::mpsc::Sender<Termination>,
    grace: Duration,
) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        let Some(signal) = signals.forever().next() else {
            return;
        };
        let termination = Termination::new(signal);

        if tx.send(termination).is_ok() {
            std::thread::sleep(grace);
        }
        if let Err(err) = restorer.restore() {
            tracing::warn!(error = %err, "terminal restore failed");
        }
        std::process::exit(termination.exit_code());
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
