//! Top-level UI layout: one bordered panel plus the status bar.

pub mod constituents;
pub mod help;
pub mod history;
pub mod overview;
pub mod simulation;
pub mod status_bar;
pub mod timeline;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use indexlens_core::domain::IndexId;

use crate::app::{AppState, LoadState, Panel, LOAD_FAILED};
use crate::theme;

pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    draw_panel(f, chunks[0], app);
    status_bar::render(f, chunks[1], app);
}

fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(
            " {} · {} [{}] ",
            app.params.index.display_name(),
            panel.label(),
            panel.index() + 1
        ))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if panel == Panel::Help {
        help::render(f, inner);
        return;
    }

    let store = match (&app.load, &app.store) {
        (LoadState::Ready, Some(store)) => store,
        (LoadState::Failed(error), _) => return render_failed(f, inner, error),
        (LoadState::Loading(index), _) => return render_loading(f, inner, *index),
        (LoadState::Ready, None) => return render_loading(f, inner, app.params.index),
    };

    match panel {
        Panel::Overview => overview::render(f, inner, app, store),
        Panel::Timeline => timeline::render(f, inner, app, store),
        Panel::Constituents => constituents::render(f, inner, app, store),
        Panel::Simulation => simulation::render(f, inner, app, store),
        Panel::History => history::render(f, inner, app, store),
        Panel::Help => {}
    }
}

fn render_loading(f: &mut Frame, area: Rect, index: IndexId) {
    let line = Line::from(Span::styled(
        format!("{} を読み込み中…", index.display_name()),
        theme::muted(),
    ));
    f.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
}

fn render_failed(f: &mut Frame, area: Rect, error: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(LOAD_FAILED, theme::error())),
        Line::from(""),
        Line::from(Span::styled(error.to_string(), theme::muted())),
        Line::from(Span::styled("R: 再読み込み", theme::accent())),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

/// Horizontal bar of `width` cells scaled so `max` fills it.
pub fn weight_bar(weight: f64, max: f64, width: usize) -> String {
    if !(max > 0.0) || !(weight > 0.0) {
        return String::new();
    }
    let cells = ((weight / max).min(1.0) * width as f64).round() as usize;
    "█".repeat(cells.max(1))
}

/// Rows `scroll..` of `lines`, clamped so the last page stays full.
pub fn visible<T>(lines: Vec<T>, scroll: usize, height: usize) -> Vec<T> {
    let max_scroll = lines.len().saturating_sub(height);
    lines.into_iter().skip(scroll.min(max_scroll)).collect()
}

/// Placeholder line for a missing optional document.
pub fn placeholder(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), theme::muted()))
}
