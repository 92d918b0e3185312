//! Shared application state for the web server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stepwise_common::ProblemType;
use stepwise_db::{Database, DatabaseOptions, MemorySolutionStore, SharedStore, SqliteSolutionStore};
use stepwise_solver::{Solver, TemplateRenderer};
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{Config, StorageBackend};

/// Events pushed to connected clients via SSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A submission was solved and stored
    SolutionCreated { id: Uuid, problem_type: ProblemType, created_at: DateTime<Utc> },
}

/// Shared state injected into every Axum handler.
#[derive(Clone)]
pub struct AppState {
    pub solver: Arc<Solver>,
    pub store: SharedStore,
    pub static_dir: PathBuf,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AppEvent>,
}

impl AppState {
    pub fn new(solver: Solver, store: SharedStore) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            solver: Arc::new(solver),
            store,
            static_dir: PathBuf::from("static"),
            event_tx,
        }
    }

    pub fn with_static_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.static_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Build the solver and open the configured store.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let templates = Path::new(&config.templates.dir);
        if !templates.is_dir() {
            warn!("Template directory {} does not exist; every solve will fail", templates.display());
        }
        let renderer = TemplateRenderer::new(templates)
            .with_currency_symbol(config.templates.currency_symbol.clone());

        let store: SharedStore = match config.database.backend {
            StorageBackend::Sqlite => {
                let options = DatabaseOptions::new(config.database.url.clone())
                    .with_max_connections(config.database.max_connections);
                let db = Database::connect(&options).await?;
                db.initialize().await?;
                info!("SQLite store ready at {}", db.url());
                Arc::new(SqliteSolutionStore::new(db))
            }
            StorageBackend::Memory => {
                info!("Using in-memory store; history is lost on restart");
                Arc::new(MemorySolutionStore::new())
            }
        };

        Ok(Self::new(Solver::new(renderer), store).with_static_dir(&config.server.static_dir))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    /// Notify subscribers; having none is fine.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }
}

pub type SharedState = Arc<AppState>;
