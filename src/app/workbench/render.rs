use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::{Overlay, Pane, Prompt, Workbench};

const HEADER_TEXT: &str =
    " slate   ^N New  ^O Open  ^D Folder  ^S Save  ^W Close  ^L Focus  ^Q Quit";
const EMPTY_EDITOR_TEXT: &str = "No file open. Ctrl+N creates a file, Ctrl+O opens one.";
const UNSAVED_MARK: &str = "●";

pub(super) fn render(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    workbench.cursor_screen_pos = None;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(super::HEADER_HEIGHT),
            Constraint::Length(super::STRIP_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(super::STATUS_HEIGHT),
        ])
        .split(area);

    workbench.render_header(frame, chunks[0]);
    workbench.render_strip(frame, chunks[1]);

    let body = chunks[2];
    if workbench.view.folder.is_some() && body.width > super::FOLDER_MIN_WIDTH * 2 {
        let folder_width = (body.width * super::FOLDER_WIDTH_PERCENT / 100)
            .max(super::FOLDER_MIN_WIDTH)
            .min(body.width / 2);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(folder_width), Constraint::Min(0)])
            .split(body);
        workbench.render_folder(frame, columns[0]);
        workbench.render_editor(frame, columns[1]);
    } else {
        workbench.render_editor(frame, body);
    }

    workbench.render_status(frame, chunks[3]);

    match workbench.overlay.clone() {
        Some(Overlay::ExtensionMenu { selected }) => {
            workbench.render_extension_menu(frame, area, selected)
        }
        Some(Overlay::Prompt(prompt)) => workbench.render_prompt(frame, area, &prompt),
        None => {}
    }

    if let Some(pos) = workbench.cursor_screen_pos {
        frame.set_cursor_position(pos);
    }
}

impl Workbench {
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(Span::styled(
            HEADER_TEXT,
            Style::default().fg(self.theme.header_fg),
        ));
        frame.render_widget(header, area);
    }

    /// Open files in open order; the active one highlighted, unsaved ones marked.
    fn render_strip(&self, frame: &mut Frame, area: Rect) {
        if self.view.files.is_empty() {
            let empty = Span::styled(
                " no open files",
                Style::default().fg(self.theme.palette_muted_fg),
            );
            frame.render_widget(Paragraph::new(empty), area);
            return;
        }

        let separator = Style::default().fg(self.theme.inactive_border);
        let mut spans = Vec::with_capacity(self.view.files.len() * 3);
        for entry in &self.view.files {
            let active = self.view.active.as_ref() == Some(&entry.handle);
            let marked = self.marked.as_ref() == Some(&entry.handle);
            let style = self.theme.tab(active, marked);
            spans.push(Span::styled(format!(" {} ", entry.name), style));
            if entry.unsaved {
                spans.push(Span::styled(
                    format!("{UNSAVED_MARK} "),
                    style.fg(self.theme.unsaved_fg),
                ));
            }
            spans.push(Span::styled("│", separator));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_folder(&self, frame: &mut Frame, area: Rect) {
        let Some(folder) = self.view.folder.as_ref() else {
            return;
        };

        let focused = self.area == Pane::Folder && self.overlay.is_none();
        let title = folder
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| folder.dir.display().to_string());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(focused))
            .title(format!(" {title} "));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if folder.names.is_empty() {
            let empty = Span::styled("(no files)", Style::default().fg(self.theme.palette_muted_fg));
            frame.render_widget(Paragraph::new(empty), inner);
            return;
        }

        let height = inner.height as usize;
        let offset = follow(0, folder.selected, height);
        let lines: Vec<Line> = folder
            .names
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, name)| {
                if i == folder.selected {
                    let style = if focused {
                        self.theme.selected()
                    } else {
                        Style::default().fg(self.theme.focus_border)
                    };
                    Line::from(Span::styled(name.clone(), style))
                } else {
                    Line::from(name.clone())
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.area == Pane::Editor && self.overlay.is_none();
        let active = self
            .active_index()
            .and_then(|i| self.view.files.get(i))
            .cloned();

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(focused));
        if let Some(entry) = &active {
            let mut title = vec![Span::raw(format!(" {} ", entry.name))];
            if entry.unsaved {
                title.push(Span::styled(
                    format!("{UNSAVED_MARK} "),
                    Style::default().fg(self.theme.unsaved_fg),
                ));
            }
            block = block.title(Line::from(title));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if active.is_none() {
            let hint = Span::styled(
                EMPTY_EDITOR_TEXT,
                Style::default().fg(self.theme.palette_muted_fg),
            );
            frame.render_widget(Paragraph::new(hint), inner);
            return;
        }

        let controller = self.shell.controller();
        let buffer = controller.buffer();
        let config = controller.config();
        let tab_size = config.tab_size.max(1) as usize;

        let gutter_width = if config.show_line_numbers {
            digits(buffer.len_lines()) + 1
        } else {
            0
        };
        let text_width = (inner.width as usize).saturating_sub(gutter_width);
        let height = inner.height as usize;

        let (row, col) = buffer.cursor();
        let cursor_line = buffer.line_text(row);
        let cursor_x = display_col(&cursor_line, col, tab_size);

        let scroll_row = follow(self.scroll.0, row, height);
        let scroll_col = follow(self.scroll.1, cursor_x, text_width);

        let gutter_style = Style::default().fg(self.theme.gutter_fg);
        let end = (scroll_row + height).min(buffer.len_lines());
        let lines: Vec<Line> = (scroll_row..end)
            .map(|r| {
                let mut spans = Vec::with_capacity(2);
                if gutter_width > 0 {
                    spans.push(Span::styled(
                        format!("{:>w$} ", r + 1, w = gutter_width - 1),
                        gutter_style,
                    ));
                }
                let text = buffer.line_text(r);
                spans.push(Span::raw(visible_segment(
                    &text, scroll_col, text_width, tab_size,
                )));
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        self.scroll = (scroll_row, scroll_col);
        if focused && height > 0 && text_width > 0 {
            let x = inner.x + (gutter_width + cursor_x - scroll_col) as u16;
            let y = inner.y + (row - scroll_row) as u16;
            self.cursor_screen_pos = Some((x, y));
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if let Some(message) = &self.view.message {
            let notice = Span::styled(
                format!(" {message}"),
                Style::default().fg(self.theme.notice_fg),
            );
            frame.render_widget(Paragraph::new(notice), area);
            return;
        }

        if let Some(name) = self
            .marked
            .as_ref()
            .and_then(|handle| self.strip_index(handle))
            .map(|i| &self.view.files[i].name)
        {
            let hint = Paragraph::new(format!(" Ctrl+W closes {name}, any other key keeps it"))
                .style(Style::default().fg(self.theme.notice_fg));
            frame.render_widget(hint, area);
            return;
        }

        let focus = match self.area {
            Pane::Editor => "Editor",
            Pane::Folder => "Folder",
        };
        let text = match self.active_index().and_then(|i| self.view.files.get(i)) {
            Some(entry) => {
                let (row, col) = self.shell.controller().buffer().cursor();
                let dirty = if entry.unsaved { " [+]" } else { "" };
                format!(
                    " {}{} | Ln {}, Col {} | {}",
                    entry.name,
                    dirty,
                    row + 1,
                    col + 1,
                    focus
                )
            }
            None => format!(" No file | {focus}"),
        };
        let status = Paragraph::new(text).style(Style::default().fg(self.theme.status_fg));
        frame.render_widget(status, area);
    }

    fn render_extension_menu(&self, frame: &mut Frame, area: Rect, selected: usize) {
        let extensions = &self.shell.controller().config().new_file_extensions;
        let popup = centered(area, 28, extensions.len() as u16 + 2);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.palette_border))
            .title(" New file ");
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines: Vec<Line> = extensions
            .iter()
            .enumerate()
            .map(|(i, ext)| {
                let label = format!(" {}  .{}", i + 1, ext);
                if i == selected {
                    Line::from(Span::styled(label, self.theme.selected()))
                } else {
                    Line::from(label)
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_prompt(&mut self, frame: &mut Frame, area: Rect, prompt: &Prompt) {
        let width = area.width.saturating_sub(8).clamp(20, 72);
        let popup = centered(area, width, 4);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.palette_border))
            .title(format!(" {} ", prompt.title()));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let field_width = inner.width as usize;
        let before: String = prompt.input().chars().take(prompt.cursor()).collect();
        let cursor_x = UnicodeWidthStr::width(before.as_str());
        let skip = (cursor_x + 1).saturating_sub(field_width);

        let lines = vec![
            Line::from(visible_segment(prompt.input(), skip, field_width, 1)),
            Line::from(Span::styled(
                "Enter to confirm, Esc to cancel",
                Style::default().fg(self.theme.palette_muted_fg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        self.cursor_screen_pos = Some((inner.x + (cursor_x - skip) as u16, inner.y));
    }
}

fn grapheme_width(g: &str, tab_size: usize) -> usize {
    if g == "\t" {
        tab_size
    } else {
        UnicodeWidthStr::width(g)
    }
}

/// Terminal columns taken by the first `grapheme_col` graphemes of `line`.
fn display_col(line: &str, grapheme_col: usize, tab_size: usize) -> usize {
    line.graphemes(true)
        .take(grapheme_col)
        .map(|g| grapheme_width(g, tab_size))
        .sum()
}

/// The part of `line` between display columns `skip` and `skip + width`. Tabs become
/// spaces; a wide grapheme cut by the left edge is padded with spaces.
fn visible_segment(line: &str, skip: usize, width: usize, tab_size: usize) -> String {
    let mut out = String::new();
    let mut x = 0;
    for g in line.graphemes(true) {
        let w = grapheme_width(g, tab_size);
        if x + w <= skip {
            x += w;
            continue;
        }
        if x + w > skip + width {
            break;
        }
        if x < skip || g == "\t" {
            out.push_str(&" ".repeat(x + w - skip.max(x)));
        } else {
            out.push_str(g);
        }
        x += w;
    }
    out
}

/// Smallest change to `offset` that keeps `pos` inside a window of `span`.
fn follow(offset: usize, pos: usize, span: usize) -> usize {
    if span == 0 {
        return offset;
    }
    if pos < offset {
        pos
    } else if pos >= offset + span {
        pos + 1 - span
    } else {
        offset
    }
}

fn digits(n: usize) -> usize {
    n.max(1).to_string().len()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench/render.rs"]
mod tests;
