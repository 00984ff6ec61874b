//! Owned handle to the current dataset snapshot.
//!
//! Loads are numbered when they start. A load may only publish its result if
//! no newer load has started since, so the most recently *started* load wins
//! no matter which fetch finishes last. A failed load replaces the previous
//! snapshot with an explicit failure state; consumers never see partial data.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{GapscopeError, Result};
use crate::gapscope::{DatasetSnapshot, Gapscope};

/// What consumers should render.
#[derive(Debug, Clone)]
pub enum LoadStatus {
    /// No load has been started.
    Idle,
    /// The newest load has not finished.
    Loading,
    Ready(Arc<DatasetSnapshot>),
    /// The newest load failed; there is no data.
    Failed(String),
}

impl LoadStatus {
    pub fn snapshot(&self) -> Option<&Arc<DatasetSnapshot>> {
        match self {
            LoadStatus::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Identity of one started load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    sequence: u64,
}

impl LoadTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Debug, Default)]
enum Outcome {
    #[default]
    Empty,
    Ready(Arc<DatasetSnapshot>),
    Failed(String),
}

#[derive(Debug, Default)]
struct Inner {
    /// Sequence of the load that produced `outcome`.
    settled: u64,
    outcome: Outcome,
}

/// Holds the pipeline and the latest published snapshot.
#[derive(Debug)]
pub struct DatasetHandle {
    engine: Arc<Gapscope>,
    started: AtomicU64,
    state: RwLock<Inner>,
}

impl DatasetHandle {
    pub fn new(engine: Gapscope) -> Self {
        Self {
            engine: Arc::new(engine),
            started: AtomicU64::new(0),
            state: RwLock::new(Inner::default()),
        }
    }

    pub fn engine(&self) -> &Gapscope {
        &self.engine
    }

    /// Register a new load. Any load started earlier becomes stale.
    pub fn begin_load(&self) -> LoadTicket {
        let sequence = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { sequence }
    }

    /// True when no load has started after `ticket`.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.started.load(Ordering::SeqCst) == ticket.sequence
    }

    /// Publish the result of the load identified by `ticket`.
    ///
    /// A stale ticket's result is discarded and reported as
    /// [`GapscopeError::Superseded`].
    pub async fn complete(&self, ticket: LoadTicket, result: Result<DatasetSnapshot>) -> Result<Arc<DatasetSnapshot>> {
        let mut state = self.state.write().await;

        if !self.is_current(ticket) || state.settled >= ticket.sequence {
            warn!(
                sequence = ticket.sequence,
                latest = self.started.load(Ordering::SeqCst),
                "discarding result of superseded load"
            );
            return Err(GapscopeError::Superseded {
                sequence: ticket.sequence,
            });
        }

        state.settled = ticket.sequence;
        match result {
            Ok(mut snapshot) => {
                snapshot.sequence = ticket.sequence;
                let snapshot = Arc::new(snapshot);
                state.outcome = Outcome::Ready(Arc::clone(&snapshot));
                info!(sequence = ticket.sequence, rows = snapshot.report.rows_indexed, "snapshot published");
                Ok(snapshot)
            }
            Err(e) => {
                warn!(sequence = ticket.sequence, error = %e, "load failed");
                state.outcome = Outcome::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Start a load whose text comes from `fetch`.
    ///
    /// The load is registered when this is called, not when the returned
    /// future is first polled. The fetch is the only suspension point;
    /// everything after it runs synchronously.
    pub fn load_with<'a, F>(
        &'a self,
        label: impl Into<String>,
        path: Option<PathBuf>,
        fetch: F,
    ) -> impl Future<Output = Result<Arc<DatasetSnapshot>>> + 'a
    where
        F: Future<Output = Result<String>> + 'a,
    {
        let ticket = self.begin_load();
        let label = label.into();
        async move {
            let result = match fetch.await {
                Ok(text) => self.engine.build_snapshot(label, path, &text),
                Err(e) => Err(e),
            };
            self.complete(ticket, result).await
        }
    }

    /// Start a load that reads `path` asynchronously.
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> impl Future<Output = Result<Arc<DatasetSnapshot>>> + '_ {
        let path = path.as_ref().to_path_buf();
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let read_path = path.clone();
        let fetch = async move {
            tokio::fs::read_to_string(&read_path)
                .await
                .map_err(|e| GapscopeError::Io { path: read_path, source: e })
        };
        self.load_with(label, Some(path), fetch)
    }

    /// Current state as consumers should see it.
    pub async fn status(&self) -> LoadStatus {
        let state = self.state.read().await;
        let started = self.started.load(Ordering::SeqCst);

        if started == 0 {
            return LoadStatus::Idle;
        }
        if state.settled < started {
            return LoadStatus::Loading;
        }
        match &state.outcome {
            Outcome::Empty => LoadStatus::Loading,
            Outcome::Ready(snapshot) => LoadStatus::Ready(Arc::clone(snapshot)),
            Outcome::Failed(message) => LoadStatus::Failed(message.clone()),
        }
    }

    /// The published snapshot, if the newest load has settled successfully.
    ///
    /// `None` while a newer load is still pending.
    pub async fn snapshot(&self) -> Option<Arc<DatasetSnapshot>> {
        let state = self.state.read().await;
        if state.settled != self.started.load(Ordering::SeqCst) {
            return None;
        }
        match &state.outcome {
            Outcome::Ready(snapshot) => Some(Arc::clone(snapshot)),
            _ => None,
        }
    }
}
