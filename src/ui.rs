//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. It only
//! reads the `App`; every state change happens in the event loop.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::{ControlsSettings, TimeField, TrackDisplayField, UiSettings};
use crate::library::{Track, format_mss};


static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next".to_string());
    // H/L and +/- are filled dynamically from config.
    map.insert("0-9".to_string(), "seek %".to_string());
    map.insert("alt+0-9".to_string(), "volume %".to_string());
    map.insert("m".to_string(), "mute".to_string());
    map.insert("s".to_string(), "shuffle".to_string());
    map.insert("r".to_string(), "repeat".to_string());
    map.insert("f".to_string(), "like".to_string());
    map.insert("o".to_string(), "playlist".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds and volume step.
fn controls_text(controls: &ControlsSettings) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "space/p", "h/l", "H/L", "0-9", "+/-", "alt+0-9", "m", "s", "r", "f", "o", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] scrub -/+{}s", controls.scrub_seconds)),
            "+/-" => Some(format!("[+/-] volume ±{}", controls.volume_step)),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn overlay_controls_text() -> &'static str {
    "[j/k] move | [gg/G] top/bottom | [/] filter | [enter] play | [esc] close"
}

/// Build the "now playing" track text according to `ui` settings.
fn now_playing_track_text(track: &Track, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in &ui.now_playing_track_fields {
        match f {
            TrackDisplayField::Display => {
                if !track.display.trim().is_empty() {
                    parts.push(track.display.clone());
                }
            }
            TrackDisplayField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.clone());
                }
            }
            TrackDisplayField::Artist => {
                if !track.artist.trim().is_empty() {
                    parts.push(track.artist.clone());
                }
            }
            TrackDisplayField::Album => {
                if !track.album.trim().is_empty() {
                    parts.push(track.album.clone());
                }
            }
            TrackDisplayField::Duration => parts.push(format_mss(track.duration_secs)),
            TrackDisplayField::Id => parts.push(track.id.to_string()),
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(&ui.now_playing_track_separator)
    }
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(elapsed: u32, total: u32, ui: &UiSettings) -> Option<String> {
    if ui.now_playing_time_fields.is_empty() {
        return None;
    }

    let parts: Vec<String> = ui
        .now_playing_time_fields
        .iter()
        .map(|f| match f {
            TimeField::Elapsed => format_mss(elapsed),
            TimeField::Total => format_mss(total),
            TimeField::Remaining => format!("-{}", format_mss(total.saturating_sub(elapsed))),
        })
        .collect();

    Some(parts.join(&ui.now_playing_time_separator))
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

/// Upper-case the characters of `title` at the fuzzy-match `positions`.
fn highlight_matches(title: &str, positions: Vec<usize>) -> String {
    let mut rendered = String::new();
    let mut pos_iter = positions.into_iter();
    let mut next_pos = pos_iter.next();

    for (ci, ch) in title.chars().enumerate() {
        if next_pos == Some(ci) {
            for up in ch.to_uppercase() {
                rendered.push(up);
            }
            next_pos = pos_iter.next();
        } else {
            rendered.push(ch);
        }
    }
    rendered
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(5),
        ])
        .split(frame.area());

    let state = app.engine.state();
    let track = app.engine.current_track();

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadence ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    {
        let mut title = now_playing_track_text(track, ui_settings);
        if state.is_liked {
            title.push_str("  ♥");
        }
        let mut lines = vec![
            Line::from(title).bold(),
            Line::from(format!("Artist: {}", track.artist)),
            Line::from(format!("Album: {}", track.album)),
        ];
        if ui_settings.show_artwork && !track.artwork.trim().is_empty() {
            lines.push(Line::from(format!("Artwork: {}", track.artwork)).dim());
        }

        // Long artwork references are clipped rather than wrapped.
        let now_playing = Paragraph::new(lines)
            .block(Block::bordered().padding(left_pad()).title(" now playing "));
        frame.render_widget(now_playing, chunks[1]);
    }

    // Progress
    {
        let label = now_playing_time_text(state.elapsed_secs, track.duration_secs, ui_settings)
            .unwrap_or_default();
        let gauge = LineGauge::default()
            .block(Block::bordered().padding(left_pad()).title(" progress "))
            .filled_style(Style::default().add_modifier(Modifier::BOLD))
            .label(label)
            .ratio(app.engine.progress());
        frame.render_widget(gauge, chunks[2]);
    }

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(if state.is_playing { "Playing" } else { "Paused" }.to_string());

        if state.is_shuffled {
            parts.push("Shuffle: ON".to_string());
        } else {
            parts.push("Shuffle: OFF".to_string());
        }

        parts.push(format!("Repeat: {}", state.repeat_mode.label()));

        if state.is_muted {
            parts.push(format!("Volume: {}% (muted)", state.volume_percent));
        } else {
            parts.push(format!("Volume: {}%", state.volume_percent));
        }

        if let Some(msg) = &app.status_message {
            parts.push(msg.clone());
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(Block::bordered().padding(left_pad()).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[3]);

    let footer_text = if app.playlist_open {
        overlay_controls_text().to_string()
    } else {
        controls_text(controls_settings)
    };
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);

    if app.playlist_open {
        draw_playlist(frame, app);
    }
}

/// Overlay height for `rows` tracks plus borders, saturating at `u16::MAX`.
fn playlist_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

/// Playlist overlay: a popup over the main view with cursor and filter.
fn draw_playlist(frame: &mut Frame, app: &App) {
    let display = app.display_indices();
    let catalog = app.engine.catalog();
    let state = app.engine.state();

    let height = playlist_height(catalog.len());
    let area = centered_rect_sized(64, height, frame.area());
    frame.render_widget(Clear, area);

    let q = app.filter_query.trim();
    let query_lower = if q.is_empty() {
        None
    } else if app.uses_lower_titles() {
        Some(q.to_ascii_lowercase())
    } else {
        None
    };

    // Center the cursor when possible by creating a visible window.
    // Only build ListItems for the visible window.
    let total = display.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = display.iter().position(|&i| i == app.cursor).unwrap_or(0);
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let items: Vec<ListItem> = display[start..end]
        .iter()
        .map(|&i| {
            let track = &catalog[i];
            let marker = if track.id != state.current_track_id {
                "  "
            } else if state.is_playing {
                "▶ "
            } else {
                "• "
            };

            let label = if q.is_empty() {
                track.display.clone()
            } else {
                let positions = match query_lower.as_deref() {
                    Some(ql) => app.fuzzy_match_positions_for_track_lower(i, ql),
                    None => App::fuzzy_match_positions(&track.display, q),
                };
                match positions {
                    Some(positions) => highlight_matches(&track.display, positions),
                    None => track.display.clone(),
                }
            };

            ListItem::new(format!("{marker}{label}  {}", format_mss(track.duration_secs)))
        })
        .collect();

    let title = if app.filter_mode || !q.is_empty() {
        format!(" playlist /{} ", app.filter_query)
    } else {
        " playlist ".to_string()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ratatui::widgets::ListState::default();
    if total > 0 {
        list_state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}
