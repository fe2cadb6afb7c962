//! Background loader thread.
//!
//! Document fetches block (local disk or HTTP), so they run off the UI
//! thread. Communication with the main loop is via `mpsc` channels.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use indexlens_core::data::{DataStore, DocumentSource};
use indexlens_core::domain::IndexId;

/// Commands sent from the TUI to the loader.
#[derive(Debug)]
pub enum WorkerCommand {
    Load { index: IndexId },
    Shutdown,
}

/// Responses sent from the loader back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Loaded { store: Box<DataStore>, elapsed_ms: u128 },
    LoadFailed { index: IndexId, error: String },
}

pub fn spawn_worker(
    source: Box<dyn DocumentSource>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("indexlens-loader".into())
        .spawn(move || worker_loop(source.as_ref(), rx, tx))
}

fn worker_loop(source: &dyn DocumentSource, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Load { index }) => {
                let response = load(source, index);
                if tx.send(response).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("loader thread exiting");
}

fn load(source: &dyn DocumentSource, index: IndexId) -> WorkerResponse {
    let started = Instant::now();
    match DataStore::load_index(source, index) {
        Ok(store) => WorkerResponse::Loaded {
            store: Box::new(store),
            elapsed_ms: started.elapsed().as_millis(),
        },
        Err(e) => {
            tracing::warn!(%index, error = %e, "load failed");
            WorkerResponse::LoadFailed {
                index,
                error: e.to_string(),
            }
        }
    }
}
