//! Fixture loading and app construction for unit tests.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use ratatui::backend::TestBackend;
use ratatui::Terminal;

use indexlens_core::data::{DataStore, DirectorySource};
use indexlens_core::DashboardConfig;

use crate::app::{AppState, LoadState};
use crate::worker::{WorkerCommand, WorkerResponse};

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../indexlens-core/tests/fixtures/data")
}

pub fn fixture_store(index: &str) -> DataStore {
    DataStore::load(&DirectorySource::new(fixture_dir()), index).unwrap()
}

/// App with default config and live channel ends, nothing loaded.
pub fn test_app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(&DashboardConfig::default(), cmd_tx, resp_rx);
    (app, cmd_rx, resp_tx)
}

/// App with `index` already loaded from the fixtures.
pub fn loaded_app(index: &str) -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (mut app, cmd_rx, resp_tx) = test_app();
    let store = fixture_store(index);
    app.params.index = store.index();
    app.store = Some(store);
    app.load = LoadState::Ready;
    (app, cmd_rx, resp_tx)
}

/// Render the whole UI into a test buffer and return it as text, one line
/// per row. Wide characters leave a blank in the following cell.
pub fn render_text(app: &AppState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| crate::ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
