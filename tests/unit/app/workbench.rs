use super::*;
use crate::kernel::services::ports::SessionSettings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fs;
use tempfile::tempdir;

fn settings_in(dir: &Path) -> Settings {
    Settings {
        session: SessionSettings {
            file: dir.join("opened_files.txt"),
            restore_on_startup: true,
        },
        ..Settings::default()
    }
}

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code, KeyModifiers::CONTROL))
}

fn ctrl_shift(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(
        code,
        KeyModifiers::CONTROL | KeyModifiers::SHIFT,
    ))
}

fn type_text(workbench: &mut Workbench, text: &str) {
    for ch in text.chars() {
        workbench.handle_input(&key(KeyCode::Char(ch)));
    }
}

fn names(workbench: &Workbench) -> Vec<String> {
    workbench
        .projection()
        .files
        .iter()
        .map(|e| e.name.clone())
        .collect()
}

fn active_name(workbench: &Workbench) -> Option<String> {
    workbench.projection().active.as_ref().map(FileHandle::name)
}

fn buffer_text(workbench: &Workbench) -> String {
    workbench.shell().controller().buffer().text()
}

fn open_via_prompt(workbench: &mut Workbench, name: &str) {
    workbench.handle_input(&ctrl(KeyCode::Char('o')));
    type_text(workbench, name);
    workbench.handle_input(&key(KeyCode::Enter));
}

#[test]
fn test_workbench_new() {
    let dir = tempdir().unwrap();
    let workbench = Workbench::new(&settings_in(dir.path()), None);

    assert_eq!(workbench.area(), Pane::Editor);
    assert!(workbench.overlay().is_none());
    assert!(workbench.projection().files.is_empty());
    assert!(workbench.projection().folder.is_none());
}

#[test]
fn startup_folder_is_listed() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.py"), "").unwrap();
    fs::write(dir.path().join("A.java"), "").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));

    let folder = workbench.projection().folder.as_ref().unwrap();
    assert_eq!(folder.dir, dir.path());
    assert_eq!(folder.names, ["A.java", "b.py"]);
    assert_eq!(folder.selected, 0);
}

#[test]
fn open_file_through_prompt() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "print(1)\n").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));

    let result = workbench.handle_input(&ctrl(KeyCode::Char('o')));
    assert!(result.redraws());
    match workbench.overlay() {
        Some(Overlay::Prompt(prompt)) => assert_eq!(prompt.kind(), &PromptKind::OpenFile),
        other => panic!("expected prompt, got {other:?}"),
    }

    type_text(&mut workbench, "a.py");
    workbench.handle_input(&key(KeyCode::Enter));

    assert!(workbench.overlay().is_none());
    assert_eq!(names(&workbench), ["a.py"]);
    assert_eq!(active_name(&workbench).as_deref(), Some("a.py"));
    assert_eq!(buffer_text(&workbench), "print(1)\n");
}

#[test]
fn escape_cancels_prompt_without_side_effects() {
    let dir = tempdir().unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));

    workbench.handle_input(&ctrl(KeyCode::Char('d')));
    type_text(&mut workbench, "elsewhere");
    workbench.handle_input(&key(KeyCode::Esc));

    assert!(workbench.overlay().is_none());
    assert_eq!(workbench.projection().folder.as_ref().unwrap().dir, dir.path());
    assert!(workbench.message().is_none());
}

#[test]
fn create_file_picks_extension_then_path() {
    let dir = tempdir().unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));

    workbench.handle_input(&ctrl(KeyCode::Char('n')));
    assert!(matches!(
        workbench.overlay(),
        Some(Overlay::ExtensionMenu { selected: 0 })
    ));

    workbench.handle_input(&key(KeyCode::Char('4')));
    match workbench.overlay() {
        Some(Overlay::Prompt(prompt)) => assert_eq!(
            prompt.kind(),
            &PromptKind::SavePath {
                extension: "py".to_string()
            }
        ),
        other => panic!("expected save prompt, got {other:?}"),
    }

    type_text(&mut workbench, "main");
    workbench.handle_input(&key(KeyCode::Enter));

    assert!(dir.path().join("main.py").is_file());
    assert_eq!(names(&workbench), ["main.py"]);
    assert_eq!(buffer_text(&workbench), "");
    assert_eq!(workbench.area(), Pane::Editor);
}

#[test]
fn extension_menu_navigation() {
    let dir = tempdir().unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), None);

    workbench.handle_input(&ctrl(KeyCode::Char('n')));
    workbench.handle_input(&key(KeyCode::Up));
    assert!(matches!(
        workbench.overlay(),
        Some(Overlay::ExtensionMenu { selected: 3 })
    ));
    workbench.handle_input(&key(KeyCode::Down));
    workbench.handle_input(&key(KeyCode::Down));
    workbench.handle_input(&key(KeyCode::Down));
    assert!(matches!(
        workbench.overlay(),
        Some(Overlay::ExtensionMenu { selected: 2 })
    ));

    workbench.handle_input(&key(KeyCode::Enter));
    match workbench.overlay() {
        Some(Overlay::Prompt(prompt)) => assert_eq!(prompt.title(), "New .java file"),
        other => panic!("expected save prompt, got {other:?}"),
    }

    workbench.handle_input(&key(KeyCode::Esc));
    assert!(workbench.overlay().is_none());
}

#[test]
fn creating_an_existing_file_reports_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.py"), "keep").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));

    workbench.handle_input(&ctrl(KeyCode::Char('n')));
    workbench.handle_input(&key(KeyCode::Char('4')));
    type_text(&mut workbench, "x.py");
    workbench.handle_input(&key(KeyCode::Enter));

    assert_eq!(workbench.message(), Some("Could not create the file."));
    assert!(names(&workbench).is_empty());
    assert_eq!(fs::read_to_string(dir.path().join("x.py")).unwrap(), "keep");
}

#[test]
fn typing_marks_unsaved_and_save_clears_it() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));
    open_via_prompt(&mut workbench, "a.py");

    type_text(&mut workbench, "x = 1");
    workbench.handle_input(&key(KeyCode::Enter));
    workbench.handle_input(&key(KeyCode::Tab));
    type_text(&mut workbench, "y");
    assert!(workbench.projection().files[0].unsaved);

    workbench.handle_input(&ctrl(KeyCode::Char('s')));
    assert!(!workbench.projection().files[0].unsaved);
    assert_eq!(
        fs::read_to_string(dir.path().join("a.py")).unwrap(),
        "x = 1\n    y"
    );
}

#[test]
fn editing_keys_are_ignored_without_a_file() {
    let dir = tempdir().unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), None);

    assert!(workbench.handle_input(&key(KeyCode::Char('x'))).is_unchanged());
    assert_eq!(buffer_text(&workbench), "");
}

#[test]
fn save_without_file_notifies_until_next_key() {
    let dir = tempdir().unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), None);

    workbench.handle_input(&ctrl(KeyCode::Char('s')));
    assert_eq!(workbench.message(), Some("No file is currently open."));

    let result = workbench.handle_input(&key(KeyCode::Char('x')));
    assert!(result.redraws());
    assert!(workbench.message().is_none());
}

#[test]
fn quit_with_unsaved_changes_needs_confirmation() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));
    open_via_prompt(&mut workbench, "a.py");
    type_text(&mut workbench, "x");

    let first = workbench.handle_input(&ctrl(KeyCode::Char('q')));
    assert!(first.redraws());
    assert_eq!(workbench.message(), Some(UNSAVED_QUIT_WARNING));

    let second = workbench.handle_input(&ctrl(KeyCode::Char('q')));
    assert!(second.is_quit());
}

#[test]
fn quit_confirmation_resets_on_other_keys() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));
    open_via_prompt(&mut workbench, "a.py");
    type_text(&mut workbench, "x");

    workbench.handle_input(&ctrl(KeyCode::Char('q')));
    workbench.handle_input(&key(KeyCode::Left));
    assert!(workbench.handle_input(&ctrl(KeyCode::Char('q'))).redraws());
}

#[test]
fn quit_without_unsaved_changes_is_immediate() {
    let dir = tempdir().unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), None);
    assert!(workbench.handle_input(&ctrl(KeyCode::Char('q'))).is_quit());
}

#[test]
fn ctrl_arrows_cycle_open_files() {
    let dir = tempdir().unwrap();
    for name in ["a.py", "b.py", "c.py"] {
        fs::write(dir.path().join(name), name).unwrap();
    }
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));
    for name in ["a.py", "b.py", "c.py"] {
        open_via_prompt(&mut workbench, name);
    }
    assert_eq!(active_name(&workbench).as_deref(), Some("c.py"));

    workbench.handle_input(&ctrl(KeyCode::Right));
    assert_eq!(active_name(&workbench).as_deref(), Some("a.py"));
    assert_eq!(buffer_text(&workbench), "a.py");

    workbench.handle_input(&ctrl(KeyCode::Left));
    workbench.handle_input(&ctrl(KeyCode::Left));
    assert_eq!(active_name(&workbench).as_deref(), Some("b.py"));
}

#[test]
fn ctrl_w_closes_active_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "A").unwrap();
    fs::write(dir.path().join("b.py"), "B").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));
    open_via_prompt(&mut workbench, "a.py");
    open_via_prompt(&mut workbench, "b.py");

    assert!(workbench.handle_input(&ctrl(KeyCode::Char('w'))).redraws());
    assert_eq!(names(&workbench), ["a.py"]);
    assert!(workbench.projection().active.is_none());
    assert_eq!(buffer_text(&workbench), "");

    assert!(workbench.handle_input(&ctrl(KeyCode::Char('w'))).is_unchanged());
    assert_eq!(names(&workbench), ["a.py"]);
}

#[test]
fn marked_strip_entry_closes_without_touching_active_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "A").unwrap();
    fs::write(dir.path().join("b.py"), "B").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));
    open_via_prompt(&mut workbench, "a.py");
    open_via_prompt(&mut workbench, "b.py");
    type_text(&mut workbench, "x");
    assert_eq!(buffer_text(&workbench), "xB");

    assert!(workbench
        .handle_input(&ctrl_shift(KeyCode::Left))
        .redraws());
    assert_eq!(workbench.marked().map(FileHandle::name).as_deref(), Some("a.py"));
    assert_eq!(active_name(&workbench).as_deref(), Some("b.py"));

    assert!(workbench.handle_input(&ctrl(KeyCode::Char('w'))).redraws());

    assert_eq!(names(&workbench), ["b.py"]);
    assert_eq!(active_name(&workbench).as_deref(), Some("b.py"));
    assert_eq!(buffer_text(&workbench), "xB");
    assert!(workbench.projection().files[0].unsaved);
    assert!(workbench.marked().is_none());
}

#[test]
fn strip_mark_wraps_and_drops_on_other_keys() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "A").unwrap();
    fs::write(dir.path().join("b.py"), "B").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));
    open_via_prompt(&mut workbench, "a.py");
    open_via_prompt(&mut workbench, "b.py");

    workbench.handle_input(&ctrl_shift(KeyCode::Right));
    assert_eq!(workbench.marked().map(FileHandle::name).as_deref(), Some("a.py"));
    workbench.handle_input(&ctrl_shift(KeyCode::Right));
    assert_eq!(workbench.marked().map(FileHandle::name).as_deref(), Some("b.py"));

    workbench.handle_input(&key(KeyCode::Left));
    assert!(workbench.marked().is_none());

    // Without a mark Ctrl+W falls back to the active file.
    workbench.handle_input(&ctrl(KeyCode::Char('w')));
    assert_eq!(names(&workbench), ["a.py"]);
}

#[test]
fn folder_listing_opens_selected_entry() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.h"), "A").unwrap();
    fs::write(dir.path().join("b.cpp"), "B").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));

    workbench.handle_input(&ctrl(KeyCode::Char('l')));
    assert_eq!(workbench.area(), Pane::Folder);

    workbench.handle_input(&key(KeyCode::Down));
    workbench.handle_input(&key(KeyCode::Down));
    assert_eq!(workbench.projection().folder.as_ref().unwrap().selected, 1);

    workbench.handle_input(&key(KeyCode::Enter));
    assert_eq!(workbench.area(), Pane::Editor);
    assert_eq!(active_name(&workbench).as_deref(), Some("b.cpp"));
    assert_eq!(buffer_text(&workbench), "B");
}

#[test]
fn open_folder_through_prompt_switches_to_listing() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("src");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("m.java"), "").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));

    workbench.handle_input(&ctrl(KeyCode::Char('d')));
    type_text(&mut workbench, "src");
    workbench.handle_input(&key(KeyCode::Enter));

    let folder = workbench.projection().folder.as_ref().unwrap();
    assert_eq!(folder.dir, sub);
    assert_eq!(folder.names, ["m.java"]);
    assert_eq!(workbench.area(), Pane::Folder);
}

#[test]
fn paste_inserts_normalised_text() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "").unwrap();
    let mut workbench = Workbench::new(&settings_in(dir.path()), Some(dir.path()));
    open_via_prompt(&mut workbench, "a.py");

    let result = workbench.handle_input(&InputEvent::Paste("a\r\nb\rc".to_string()));
    assert!(result.redraws());
    assert_eq!(buffer_text(&workbench), "a\nb\nc");
    assert!(workbench.projection().files[0].unsaved);
}

#[test]
fn shutdown_persists_and_next_start_restores() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "A").unwrap();
    fs::write(dir.path().join("b.py"), "B").unwrap();
    let settings = settings_in(dir.path());

    let mut workbench = Workbench::new(&settings, Some(dir.path()));
    open_via_prompt(&mut workbench, "a.py");
    open_via_prompt(&mut workbench, "b.py");
    assert!(workbench.shutdown());

    let restarted = Workbench::new(&settings, None);
    assert_eq!(names(&restarted), ["a.py", "b.py"]);
    assert_eq!(active_name(&restarted).as_deref(), Some("b.py"));

    let fresh = Workbench::new(
        &Settings {
            session: SessionSettings {
                restore_on_startup: false,
                ..settings.session.clone()
            },
            ..settings.clone()
        },
        None,
    );
    assert!(names(&fresh).is_empty());
}

#[test]
fn pane_defaults_to_editor_and_toggles() {
    assert_eq!(Pane::default(), Pane::Editor);
    assert_eq!(Pane::Editor.toggled(), Pane::Folder);
    assert_eq!(Pane::Folder.toggled(), Pane::Editor);
}
