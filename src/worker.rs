//! Background worker that runs service calls off the UI thread.

use crate::client::{ClientError, MovieClient};
use crate::movie::{ListName, MovieRecord};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq)]
pub enum WorkerCommand {
    Search {
        query: String,
    },
    AddToList {
        user_id: i64,
        movie_id: i64,
        list: ListName,
    },
}

impl WorkerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            WorkerCommand::Search { .. } => "search",
            WorkerCommand::AddToList { .. } => "add_to_list",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    SearchCompleted {
        query: String,
        result: Result<MovieRecord, ClientError>,
    },
    ListUpdated {
        list: ListName,
        result: Result<(String, Vec<String>), ClientError>,
    },
    /// The worker could not start or died; no further events will arrive.
    Failed(String),
}

pub fn spawn(
    client: MovieClient,
    cmd_rx: Receiver<WorkerCommand>,
    event_tx: Sender<WorkerEvent>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("movie-service-worker".to_string())
        .spawn(move || run(client, cmd_rx, event_tx))
}

fn run(client: MovieClient, cmd_rx: Receiver<WorkerCommand>, event_tx: Sender<WorkerEvent>) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("failed to build worker runtime: {err}");
            let _ = event_tx.send(WorkerEvent::Failed(format!(
                "Background worker failed to start: {err}"
            )));
            return;
        }
    };
    info!("Movie service worker started");

    // Blocking recv on this thread; each command runs as its own task.
    while let Ok(cmd) = cmd_rx.recv() {
        debug!(command = cmd.name(), "received ui->worker command");
        let client = client.clone();
        let event_tx = event_tx.clone();
        runtime.spawn(async move {
            let event = execute(&client, cmd).await;
            match event_tx.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    error!("ui event queue is full; dropping result");
                }
                Err(TrySendError::Disconnected(_)) => {
                    debug!("ui event receiver dropped; discarding result");
                }
            }
        });
    }

    info!("Command channel closed; stopping movie service worker");
    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
}

pub async fn execute(client: &MovieClient, cmd: WorkerCommand) -> WorkerEvent {
    match cmd {
        WorkerCommand::Search { query } => {
            let result = client.search(&query).await;
            WorkerEvent::SearchCompleted { query, result }
        }
        WorkerCommand::AddToList {
            user_id,
            movie_id,
            list,
        } => {
            let result = client
                .add_to_list(user_id, movie_id, list)
                .await
                .map(|message| (message, client.refresh_list()));
            WorkerEvent::ListUpdated { list, result }
        }
    }
}
