//! # Periodic Refresh
//!
//! Reloads every list from the store on a fixed period, in the background,
//! until told to stop.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Refresh Task Lifecycle                             │
//! │                                                                         │
//! │  RefreshTask::spawn(db, 30s)                                           │
//! │       │                                                                 │
//! │       ├──► RefreshHandle        (shutdown)                             │
//! │       └──► Receiver<Snapshot>   (one per period)                       │
//! │                                                                         │
//! │  loop {                                                                 │
//! │    select! {                                                            │
//! │      interval.tick()  ──► Snapshot::load ──► send                       │
//! │                              │                  │                       │
//! │                              │ Err: log,        │ receiver gone:        │
//! │                              │ keep schedule    │ stop                  │
//! │                                                                         │
//! │      shutdown_rx.recv() ──► stop                                        │
//! │    }                                                                    │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Timing
//! - First refresh one period after spawn; the caller loads its own initial
//!   view
//! - A refresh that overruns delays the next tick instead of bursting
//! - Each refresh is a handful of independent reads; a record added while a
//!   refresh runs shows up in that refresh or the next

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use staffstock_core::{Category, Employee, ProductSummary};
use staffstock_db::{Database, DbResult};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::commands::OutputFormat;
use crate::error::AppResult;
use crate::state::DbState;

/// Buffered snapshots before the task waits on a slow reader.
const SNAPSHOT_BUFFER: usize = 4;

// =============================================================================
// Snapshot
// =============================================================================

/// Every list the adapter shows, read in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub categories: Vec<Category>,
    pub products: Vec<ProductSummary>,
    /// When the load started. Anything committed before this is included.
    pub refreshed_at: DateTime<Utc>,
}

impl Snapshot {
    /// Loads all lists from the store.
    pub async fn load(db: &Database) -> DbResult<Self> {
        let refreshed_at = Utc::now();

        let employees = db.employees().list().await?;
        let categories = db.categories().list().await?;
        let products = db.products().list_summary().await?;

        Ok(Snapshot {
            employees,
            categories,
            products,
            refreshed_at,
        })
    }

    /// One-line summary for the terminal.
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} employees, {} categories, {} products",
            self.refreshed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.employees.len(),
            self.categories.len(),
            self.products.len()
        )
    }

    fn render(&self, format: OutputFormat) -> AppResult<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
            OutputFormat::Table => Ok(self.summary()),
        }
    }
}

// =============================================================================
// Refresh Task
// =============================================================================

/// Background task that loads a [`Snapshot`] every period.
pub struct RefreshTask {
    /// Store handle.
    db: Database,

    /// Time between refreshes.
    period: Duration,

    /// Where snapshots go.
    snapshots: mpsc::Sender<Snapshot>,

    /// Shutdown receiver.
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for stopping a spawned refresh task.
pub struct RefreshHandle {
    /// Shutdown sender.
    shutdown_tx: mpsc::Sender<()>,

    /// The running task.
    join: JoinHandle<()>,
}

impl RefreshHandle {
    /// Signals the task to stop and waits until it has.
    pub async fn shutdown(self) {
        // The task may already have stopped on its own
        let _ = self.shutdown_tx.send(()).await;

        if let Err(e) = self.join.await {
            error!(error = %e, "Refresh task ended abnormally");
        }
    }
}

impl RefreshTask {
    /// Spawns the task on the current runtime.
    ///
    /// ## Returns
    /// The handle that stops the task and the receiver of its snapshots.
    pub fn spawn(db: Database, period: Duration) -> (RefreshHandle, mpsc::Receiver<Snapshot>) {
        let (snapshots, snapshot_rx) = mpsc::channel(SNAPSHOT_BUFFER);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let task = RefreshTask {
            db,
            period,
            snapshots,
            shutdown_rx,
        };

        let join = tokio::spawn(task.run());

        (RefreshHandle { shutdown_tx, join }, snapshot_rx)
    }

    /// Runs the refresh loop.
    async fn run(mut self) {
        info!(period_ms = self.period.as_millis() as u64, "Refresh task starting");

        let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match Snapshot::load(&self.db).await {
                        Ok(snapshot) => {
                            debug!(
                                employees = snapshot.employees.len(),
                                categories = snapshot.categories.len(),
                                products = snapshot.products.len(),
                                "Refreshed"
                            );
                            if self.snapshots.send(snapshot).await.is_err() {
                                info!("Snapshot receiver dropped");
                                break;
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "Refresh failed, keeping schedule");
                        }
                    }
                }

                // Shutdown, or every handle dropped
                _ = self.shutdown_rx.recv() => {
                    info!("Refresh task shutting down");
                    break;
                }
            }
        }

        info!("Refresh task stopped");
    }
}

// =============================================================================
// Watch Command
// =============================================================================

/// Prints the current lists, then one line per refresh until Ctrl-C.
pub async fn watch(db: &DbState, period: Duration, format: OutputFormat) -> AppResult<String> {
    let initial = Snapshot::load(db.inner()).await?;
    println!("{}", initial.render(format)?);

    let (handle, snapshots) = RefreshTask::spawn(db.inner().clone(), period);

    let outcome = follow(snapshots, format, tokio::signal::ctrl_c(), |line| {
        println!("{}", line);
        Ok(())
    })
    .await;

    // Runs on errors too, so the task never outlives the command
    handle.shutdown().await;

    outcome.map(|()| "Stopped watching.".to_string())
}

/// Hands each rendered snapshot to `emit` until `stop` resolves, the task
/// goes away, or rendering or emitting fails.
///
/// Drops the receiver before returning, which unblocks a task waiting on a
/// full buffer.
async fn follow<S>(
    mut snapshots: mpsc::Receiver<Snapshot>,
    format: OutputFormat,
    stop: S,
    mut emit: impl FnMut(String) -> AppResult<()>,
) -> AppResult<()>
where
    S: Future,
{
    tokio::pin!(stop);

    loop {
        tokio::select! {
            next = snapshots.recv() => match next {
                Some(snapshot) => snapshot.render(format).and_then(&mut emit)?,
                None => return Ok(()),
            },
            _ = &mut stop => {
                info!("Interrupted");
                return Ok(());
            }
        }
    }
}
