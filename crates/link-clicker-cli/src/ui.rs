use link_clicker_engine::{LinkSpan, LinkTarget, Settings, ViewMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs},
};

use crate::app::{App, NoteTab};

pub fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    // Note list panel
    let file_items: Vec<ListItem> = app
        .notes()
        .iter()
        .map(|file| ListItem::new(Line::from(format!("📄 {}", file.link_path()))))
        .collect();
    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Notes"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Tab bar and note panel
    let note_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(chunks[1]);
    let titles: Vec<Line> = app
        .editor
        .tabs
        .iter()
        .map(|tab| Line::from(tab.file.basename().to_string()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.editor.active)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, note_area[0]);

    let view_mode = app.editor.view_mode;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Note ({})", mode_name(view_mode)));
    let inner = block.inner(note_area[1]);
    f.render_widget(block, note_area[1]);

    let editor = &mut app.editor;
    let vault = &editor.vault;
    match editor.tabs.get_mut(editor.active) {
        Some(tab) => {
            tab.viewport.area = inner;
            let lines = note_lines(tab, |target| {
                vault.resolve(target, tab.file.path()).is_some()
            });
            f.render_widget(Paragraph::new(lines), inner);
            if view_mode != ViewMode::Reading
                && let Some(cell) = tab.cursor_cell()
            {
                f.set_cursor_position(cell);
            }
        }
        None => f.render_widget(Paragraph::new("Select a note and press Enter"), inner),
    }

    // Status and help
    let help = vec![
        Line::from(app.status.clone()),
        Line::from(vec![
            Span::raw("q: Quit | j/k: Select | Enter: Open | Tab: Next tab | x: Close tab | m: Mode | "),
            Span::raw(settings_help(app.clicker.settings())),
        ]),
    ];
    f.render_widget(Paragraph::new(help), rows[1]);

    if let Some(path) = &app.editor.pending_creation {
        let area = centered_rect(50, 5, f.area());
        let popup = Paragraph::new(vec![
            Line::from(format!("Create note {path}?")),
            Line::from(""),
            Line::from("y/Enter: Create | n/Esc: Cancel"),
        ])
        .block(Block::default().borders(Borders::ALL).title("New note"));
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

fn mode_name(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::LivePreview => "live preview",
        ViewMode::Source => "source",
        ViewMode::Reading => "reading",
    }
}

fn settings_help(settings: &Settings) -> String {
    let flag = |on: bool| if on { "on" } else { "off" };
    format!(
        "1: Modifier to jump [{}] | 2: Confirm create [{}] | 3: New tab [{}]",
        flag(settings.jump_only_with_modifier),
        flag(settings.confirm_create_file),
        flag(settings.open_at_new_tab),
    )
}

fn link_style(span: &LinkSpan, resolved: bool) -> Style {
    match (span.is_embed(), resolved) {
        (true, _) => Style::default().fg(Color::Magenta),
        (false, true) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
        (false, false) => Style::default().fg(Color::Red),
    }
}

/// Visible lines of a note with links highlighted.
fn note_lines(
    tab: &NoteTab,
    is_resolved: impl Fn(&str) -> bool,
) -> Vec<Line<'static>> {
    let first = tab.viewport.scroll;
    let last = (first + usize::from(tab.viewport.area.height)).min(tab.buffer.line_count());

    (first..last)
        .map(|line| {
            let text = tab.buffer.line_text(line).unwrap_or_default();
            let ranges: Vec<_> = tab
                .links
                .iter()
                .filter(|span| span.start.line == line)
                .map(|span| {
                    let target = LinkTarget::normalize(&span.target);
                    let style = link_style(span, is_resolved(target.as_str()));
                    (span.start.column, span.end.column, style)
                })
                .collect();
            styled_line(&text, &ranges)
        })
        .collect()
}

/// Splits `text` into spans of equal style. `ranges` are half-open char column
/// ranges; earlier ranges win where they overlap.
fn styled_line(text: &str, ranges: &[(usize, usize, Style)]) -> Line<'static> {
    let cells: Vec<(char, Style)> = text
        .chars()
        .enumerate()
        .map(|(column, c)| {
            let style = ranges
                .iter()
                .find(|(start, end, _)| (*start..*end).contains(&column))
                .map(|(_, _, style)| *style)
                .unwrap_or_default();
            (c, style)
        })
        .collect();

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut current_style = Style::default();
    for (c, style) in cells {
        if style != current_style && !current.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut current), current_style));
        }
        current_style = style;
        current.push(c);
    }
    if !current.is_empty() {
        spans.push(Span::styled(current, current_style));
    }
    Line::from(spans)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
