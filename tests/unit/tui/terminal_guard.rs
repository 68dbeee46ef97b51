use super::*;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingSwitch {
    log: Mutex<Vec<(&'static str, Mode)>>,
    refuse_enter: Option<Mode>,
    refuse_leave: Option<Mode>,
}

impl RecordingSwitch {
    fn log(&self) -> Vec<(&'static str, Mode)> {
        self.log.lock().unwrap().clone()
    }
}

impl ModeSwitch for RecordingSwitch {
    fn enter(&self, mode: Mode) -> io::Result<()> {
        self.log.lock().unwrap().push(("enter", mode));
        if self.refuse_enter == Some(mode) {
            return Err(io::Error::other("no tty"));
        }
        Ok(())
    }

    fn leave(&self, mode: Mode) -> io::Result<()> {
        self.log.lock().unwrap().push(("leave", mode));
        if self.refuse_leave == Some(mode) {
            return Err(io::Error::other("stdout closed"));
        }
        Ok(())
    }
}

#[test]
fn drop_leaves_modes_in_reverse_order() {
    let switch = Arc::new(RecordingSwitch::default());
    {
        let _guard = TerminalGuard::with_switch(switch.clone()).unwrap();
    }

    assert_eq!(
        switch.log(),
        vec![
            ("enter", Mode::Raw),
            ("enter", Mode::AlternateScreen),
            ("enter", Mode::BracketedPaste),
            ("enter", Mode::BarCursor),
            ("leave", Mode::BarCursor),
            ("leave", Mode::BracketedPaste),
            ("leave", Mode::AlternateScreen),
            ("leave", Mode::Raw),
        ]
    );
}

#[test]
fn restorer_runs_once_across_signal_thread_and_drop() {
    let switch = Arc::new(RecordingSwitch::default());
    let guard = TerminalGuard::with_switch(switch.clone()).unwrap();
    let restorer = guard.restorer();

    assert!(!restorer.is_restored());
    restorer.restore().unwrap();
    restorer.restore().unwrap();
    assert!(restorer.is_restored());
    drop(guard);

    let leaves = switch
        .log()
        .into_iter()
        .filter(|(op, _)| *op == "leave")
        .count();
    assert_eq!(leaves, 4);
}

#[test]
fn failed_enter_rolls_back_entered_modes() {
    let switch = Arc::new(RecordingSwitch {
        refuse_enter: Some(Mode::BracketedPaste),
        ..RecordingSwitch::default()
    });

    assert!(TerminalGuard::with_switch(switch.clone()).is_err());
    assert_eq!(
        switch.log(),
        vec![
            ("enter", Mode::Raw),
            ("enter", Mode::AlternateScreen),
            ("enter", Mode::BracketedPaste),
            ("leave", Mode::AlternateScreen),
            ("leave", Mode::Raw),
        ]
    );
}

#[test]
fn failing_leave_still_leaves_raw_mode() {
    let switch = Arc::new(RecordingSwitch {
        refuse_leave: Some(Mode::AlternateScreen),
        ..RecordingSwitch::default()
    });
    let guard = TerminalGuard::with_switch(switch.clone()).unwrap();

    assert!(guard.restorer().restore().is_err());
    assert_eq!(switch.log().last(), Some(&("leave", Mode::Raw)));
    assert!(guard.restorer().is_restored());
}

#[test]
fn termination_exit_code_follows_shell_convention() {
    assert_eq!(Termination::new(2).exit_code(), 130);
    assert_eq!(Termination::new(15).exit_code(), 143);
}
