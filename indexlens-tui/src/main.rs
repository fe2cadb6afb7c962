//! IndexLens TUI: six-panel terminal dashboard for one stock index at a time.
//!
//! Panels:
//! 1. Overview: index card, trailing returns, price chart, breakdowns
//! 2. Timeline: constituent changes grouped by day
//! 3. Constituents: searchable, sortable table
//! 4. Simulation: an amount split across the largest holdings
//! 5. History: leading sectors and countries per year
//! 6. Help: keyboard shortcuts
//!
//! Logs go to `indexlens-tui.log` in the temp directory so the alternate
//! screen stays clean. Filter with `RUST_LOG`.

mod app;
mod input;
mod theme;
mod ui;
mod worker;

#[cfg(test)]
mod test_helpers;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use indexlens_core::domain::IndexId;
use indexlens_core::DashboardConfig;

use crate::app::AppState;
use crate::worker::WorkerCommand;

const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "indexlens-tui", about = "IndexLens terminal dashboard")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Local data directory. Overrides the config file.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Static HTTP origin serving the data documents. Overrides --data-dir.
    #[arg(long)]
    base_url: Option<String>,

    /// Index to open first.
    #[arg(long)]
    index: Option<IndexId>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_tracing()?;

    let config = resolve_config(&cli)?;
    let source = config
        .open_source()
        .context("データの読み込みに失敗しました。しばらくしてから再度お試しください")?;
    tracing::info!(log = %log_path.display(), index = %config.view.default_index, "starting");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(source, cmd_rx, resp_tx).context("spawn loader thread")?;

    let mut app = AppState::new(&config, cmd_tx.clone(), resp_rx);
    app.request_load(config.view.default_index);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    // A blocking fetch may still be in flight; don't wait on it.
    drop(worker_handle);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain loader responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms tick)
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key, Instant::now());
            }
        }

        // 4. Fire due debounces
        if app.tick(Instant::now()) {
            tracing::debug!(search = %app.params.search, amount = app.params.amount, "parameters applied");
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

fn init_tracing() -> Result<PathBuf> {
    let path = std::env::temp_dir().join("indexlens-tui.log");
    let file = File::create(&path).with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(path)
}

fn resolve_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data.dir = dir.clone();
        config.data.base_url = None;
    }
    if let Some(url) = &cli.base_url {
        config.data.base_url = Some(url.clone());
    }
    if let Some(index) = cli.index {
        config.view.default_index = index;
    }
    Ok(config)
}
