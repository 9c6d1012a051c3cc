//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, Pane};
use crate::audio::AudioBackend;
use crate::config::UiSettings;
use crate::library::{AudioFileRef, row_label};

/// Key bindings in the order they are shown in the footer.
const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("tab", "switch list"),
    ("enter", "play selected song"),
    ("space/p", "play/pause"),
    ("s", "stop"),
    ("f", "favorite"),
    ("u", "unfavorite"),
    ("x", "remove from all"),
    ("d", "remove from list"),
    ("w", "save favorites"),
    ("R", "rescan"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

struct Areas {
    header: Rect,
    status: Rect,
    all: Rect,
    favorites: Rect,
    footer: Rect,
}

fn areas(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(area);
    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    Areas {
        header: chunks[0],
        status: chunks[1],
        all: lists[0],
        favorites: lists[1],
        footer: chunks[3],
    }
}

/// Slice of a list that fits `height` rows, keeping the selection centered
/// when possible. Returns `(start, end, selected position within the slice)`.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    let sel_pos = selected.min(total.saturating_sub(1));
    if total <= height || height == 0 {
        return (0, total, sel_pos);
    }
    let half = height / 2;
    let mut start = sel_pos.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, sel_pos - start)
}

fn pane_files<B: AudioBackend>(app: &App<B>, pane: Pane) -> &[AudioFileRef] {
    match pane {
        Pane::All => app.library().list_all(),
        Pane::Favorites => app.library().list_favorites(),
    }
}

/// The list row under a terminal cell, if any.
pub fn row_at<B: AudioBackend>(
    area: Rect,
    app: &App<B>,
    column: u16,
    row: u16,
) -> Option<(Pane, usize)> {
    let a = areas(area);
    let pos = Position::new(column, row);
    for (pane, rect) in [(Pane::All, a.all), (Pane::Favorites, a.favorites)] {
        let inner = Block::default().borders(Borders::ALL).inner(rect);
        if !inner.contains(pos) {
            continue;
        }
        let total = pane_files(app, pane).len();
        let (start, end, _) = visible_window(total, inner.height as usize, app.selected(pane));
        let index = start + usize::from(row - inner.y);
        return (index < end).then_some((pane, index));
    }
    None
}

fn status_text<B: AudioBackend>(app: &App<B>) -> String {
    let mut parts: Vec<String> = Vec::new();

    let player = app.player();
    parts.push(format!("PLAYBACK: {}", player.status().label()));
    if let Some(file) = player.current() {
        let elapsed = Duration::from_micros(player.position_micros());
        parts.push(format!(
            "Song: {} [{}]",
            file.display_name(),
            format_mmss(elapsed)
        ));
    }
    if app.is_scanning() {
        parts.push("SCANNING".to_string());
    }
    parts.push(format!(
        "Songs: {} • Favorites: {}",
        app.library().len_all(),
        app.library().len_favorites()
    ));
    parts.push(format!("Dir: {}", app.root().display()));

    format!("{}\n{}", app.status(), parts.join(" • "))
}

fn draw_list<B: AudioBackend>(
    frame: &mut Frame,
    area: Rect,
    app: &App<B>,
    pane: Pane,
    ui_settings: &UiSettings,
) {
    let files = pane_files(app, pane);
    let focused = app.focus == pane;

    let name = match pane {
        Pane::All => "All Songs",
        Pane::Favorites => "Favorites",
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {name} ({}) ", files.len()));
    if focused {
        block = block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }

    if files.is_empty() {
        let empty = if pane == Pane::All && app.is_scanning() {
            "Scanning..."
        } else {
            "Nothing here yet"
        };
        let p = Paragraph::new(empty)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(p, area);
        return;
    }

    // Only build ListItems for the visible window.
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, selected_pos_in_visible) =
        visible_window(files.len(), height, app.selected(pane));
    let playing = app.player().current().map(|f| f.path());

    let visible_items: Vec<ListItem> = files[start..end]
        .iter()
        .map(|f| {
            let marker = (pane == Pane::Favorites && app.library().is_orphan(f.path()))
                .then_some(ui_settings.orphan_marker.as_str());
            let item = ListItem::new(row_label(f, ui_settings.show_paths, marker));
            if playing == Some(f.path()) {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let highlight = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };
    let list = List::new(visible_items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol(if focused { "> " } else { "  " });
    let mut state = ListState::default();
    state.select(Some(selected_pos_in_visible));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the entire UI into the provided `frame`.
pub fn draw<B: AudioBackend>(frame: &mut Frame, app: &App<B>, ui_settings: &UiSettings) {
    let a = areas(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadenza ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, a.header);

    let status_par = Paragraph::new(status_text(app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, a.status);

    draw_list(frame, a.all, app, Pane::All, ui_settings);
    draw_list(frame, a.favorites, app, Pane::Favorites, ui_settings);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, a.footer);
}
