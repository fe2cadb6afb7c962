//! Keyboard input dispatch: text-entry modes first, then global keys.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, InputMode, Panel};

const PAGE: usize = 10;

pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    match app.input_mode {
        InputMode::Search => handle_search_key(app, key, now),
        InputMode::Amount => handle_amount_key(app, key, now),
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => {
            app.clear_search();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            app.commit_search();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(now),
        KeyCode::Char(c) => app.push_search_char(c, now),
        _ => {}
    }
}

fn handle_amount_key(app: &mut AppState, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.commit_amount();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.pop_amount_digit(now),
        KeyCode::Char(c) if c.is_ascii_digit() => app.push_amount_digit(c, now),
        _ => {}
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            if let Some(panel) = Panel::from_index(index) {
                app.switch_panel(panel);
            }
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.switch_panel(app.active_panel.prev());
            } else {
                app.switch_panel(app.active_panel.next());
            }
        }
        KeyCode::BackTab => app.switch_panel(app.active_panel.prev()),

        KeyCode::Char('/') => {
            app.switch_panel(Panel::Constituents);
            app.input_mode = InputMode::Search;
        }
        KeyCode::Char('a') => {
            app.switch_panel(Panel::Simulation);
            app.input_mode = InputMode::Amount;
        }

        KeyCode::Char('s') => app.toggle_sort_column(),
        KeyCode::Char('r') => app.reverse_sort(),
        KeyCode::Char('f') => app.cycle_type_filter(),
        KeyCode::Char('p') => app.cycle_period(),
        KeyCode::Char('i') => app.cycle_index(),
        KeyCode::Char('R') => app.request_load(app.params.index),

        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::Home => app.scroll = 0,
        _ => {}
    }
}
