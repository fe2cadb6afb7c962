//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The loader thread communicates via channels.

use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use indexlens_core::config::ViewConfig;
use indexlens_core::data::DataStore;
use indexlens_core::debounce::Debouncer;
use indexlens_core::domain::IndexId;
use indexlens_core::params::{SortSpec, ViewParams};
use indexlens_core::DashboardConfig;

use crate::worker::{WorkerCommand, WorkerResponse};

/// Shown in place of every panel when a load fails.
pub const LOAD_FAILED: &str = "データの読み込みに失敗しました。しばらくしてから再度お試しください";

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Overview,
    Timeline,
    Constituents,
    Simulation,
    History,
    Help,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Overview,
        Panel::Timeline,
        Panel::Constituents,
        Panel::Simulation,
        Panel::History,
        Panel::Help,
    ];

    pub fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Timeline => 1,
            Panel::Constituents => 2,
            Panel::Simulation => 3,
            Panel::History => 4,
            Panel::Help => 5,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Timeline => "Timeline",
            Panel::Constituents => "Constituents",
            Panel::Simulation => "Simulation",
            Panel::History => "History",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Panel {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading(IndexId),
    Ready,
    Failed(String),
}

pub struct AppState {
    pub running: bool,
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub view: ViewConfig,
    /// Applied parameters. `search` and `amount` only change when a debounce fires.
    pub params: ViewParams,
    pub store: Option<DataStore>,
    pub load: LoadState,

    /// Text as typed, ahead of the debounced `params.search`.
    pub search_input: String,
    /// Digits as typed, ahead of the debounced `params.amount`.
    pub amount_input: String,
    pub search_debounce: Debouncer<String>,
    pub amount_debounce: Debouncer<f64>,

    /// First visible row of the scrollable panels.
    pub scroll: usize,
    pub status_message: Option<(String, StatusLevel)>,

    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
}

impl AppState {
    pub fn new(
        config: &DashboardConfig,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        let view = config.view.clone();
        let params = ViewParams::new(view.default_index).with_amount(view.default_amount);
        Self {
            running: true,
            active_panel: Panel::Overview,
            input_mode: InputMode::Normal,
            amount_input: format!("{:.0}", params.amount),
            params,
            store: None,
            load: LoadState::Loading(view.default_index),
            search_input: String::new(),
            search_debounce: Debouncer::new(config.debounce()),
            amount_debounce: Debouncer::new(config.debounce()),
            scroll: 0,
            status_message: None,
            view,
            worker_tx,
            worker_rx,
        }
    }

    /// Ask the loader for `index`. The current store is dropped; a load
    /// never leaves a partially updated dataset on screen.
    pub fn request_load(&mut self, index: IndexId) {
        self.params.index = index;
        self.store = None;
        self.scroll = 0;
        self.load = LoadState::Loading(index);
        if self.worker_tx.send(WorkerCommand::Load { index }).is_err() {
            self.fail_load("loader thread is gone".to_string());
        }
    }

    pub fn cycle_index(&mut self) {
        let position = IndexId::ALL
            .iter()
            .position(|i| *i == self.params.index)
            .unwrap_or(0);
        let next = IndexId::ALL[(position + 1) % IndexId::ALL.len()];
        self.request_load(next);
    }

    pub fn handle_worker_response(&mut self, response: WorkerResponse) {
        match response {
            WorkerResponse::Loaded { store, elapsed_ms } => {
                // A response for an index the user already moved away from.
                if store.index() != self.params.index {
                    tracing::debug!(stale = %store.index(), "dropping stale load");
                    return;
                }
                tracing::info!(index = %store.index(), elapsed_ms, "dataset ready");
                self.set_status(format!(
                    "{} loaded ({} ms)",
                    store.index().display_name(),
                    elapsed_ms
                ));
                self.store = Some(*store);
                self.load = LoadState::Ready;
            }
            WorkerResponse::LoadFailed { index, error } => {
                if index == self.params.index {
                    self.fail_load(error);
                }
            }
        }
    }

    fn fail_load(&mut self, error: String) {
        self.store = None;
        self.load = LoadState::Failed(error.clone());
        self.set_error(error);
    }

    /// Fire any debounce whose quiet period has elapsed. Returns true if a
    /// parameter changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(term) = self.search_debounce.poll(now) {
            self.apply_search(term);
            changed = true;
        }
        if let Some(amount) = self.amount_debounce.poll(now) {
            self.params.amount = amount;
            changed = true;
        }
        changed
    }

    fn apply_search(&mut self, term: String) {
        if term != self.params.search {
            self.scroll = 0;
        }
        self.params.search = term;
    }

    pub fn push_search_char(&mut self, c: char, now: Instant) {
        self.search_input.push(c);
        self.search_debounce.schedule(self.search_input.clone(), now);
    }

    pub fn pop_search_char(&mut self, now: Instant) {
        self.search_input.pop();
        self.search_debounce.schedule(self.search_input.clone(), now);
    }

    /// Apply the typed term now, skipping the quiet period.
    pub fn commit_search(&mut self) {
        self.search_debounce.cancel();
        let term = self.search_input.clone();
        self.apply_search(term);
    }

    pub fn clear_search(&mut self) {
        self.search_debounce.cancel();
        self.search_input.clear();
        self.apply_search(String::new());
    }

    pub fn push_amount_digit(&mut self, digit: char, now: Instant) {
        if !digit.is_ascii_digit() {
            return;
        }
        if self.amount_input == "0" {
            self.amount_input.clear();
        }
        // Keeps the amount within f64's exact integer range.
        if self.amount_input.len() >= 15 {
            return;
        }
        self.amount_input.push(digit);
        self.schedule_amount(now);
    }

    pub fn pop_amount_digit(&mut self, now: Instant) {
        self.amount_input.pop();
        self.schedule_amount(now);
    }

    fn schedule_amount(&mut self, now: Instant) {
        let amount = self.amount_input.parse::<f64>().unwrap_or(0.0);
        self.amount_debounce.schedule(amount, now);
    }

    pub fn commit_amount(&mut self) {
        if let Some(amount) = self.amount_debounce.cancel() {
            self.params.amount = amount;
        }
    }

    pub fn toggle_sort_column(&mut self) {
        self.params.sort = self.params.sort.toggle(self.params.sort.column.next());
        self.scroll = 0;
    }

    pub fn reverse_sort(&mut self) {
        let sort = self.params.sort;
        self.params.sort = SortSpec {
            direction: sort.direction.flipped(),
            ..sort
        };
        self.scroll = 0;
    }

    pub fn cycle_type_filter(&mut self) {
        self.params.type_filter = self.params.type_filter.next();
        self.scroll = 0;
    }

    pub fn cycle_period(&mut self) {
        self.params.period = self.params.period.next();
    }

    pub fn switch_panel(&mut self, panel: Panel) {
        if panel != self.active_panel {
            self.active_panel = panel;
            self.scroll = 0;
        }
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_add(rows);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
