use std::sync::Arc;

use axum::extract::FromRef;

use crate::catalog::QuestionCatalog;
use crate::config::Config;
use crate::error::AppError;
use crate::store::{
    EventLog, InMemoryStore, ResultStore, SharedEventLog, SharedResultStore, SqliteStore,
};
use crate::utils::credentials::{SharedAuthenticator, StaticCredentials};

#[derive(Clone)]
pub struct AppState {
    pub events: SharedEventLog,
    pub results: SharedResultStore,
    pub credentials: SharedAuthenticator,
    pub catalog: Arc<QuestionCatalog>,
    pub config: Config,
}

impl AppState {
    /// Builds state around one store serving as both event log and result store.
    pub fn with_store<S>(store: Arc<S>, config: Config) -> Self
    where
        S: EventLog + ResultStore + 'static,
    {
        Self {
            events: store.clone(),
            results: store,
            credentials: Arc::new(StaticCredentials::default()),
            catalog: Arc::new(QuestionCatalog::new(config.questions_path.clone())),
            config,
        }
    }

    pub fn in_memory(config: Config) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), config)
    }

    /// SQLite when `DATABASE_URL` is configured, in-memory otherwise.
    pub async fn from_config(config: Config) -> Result<Self, AppError> {
        match config.database_url.clone() {
            Some(url) => {
                let store = SqliteStore::connect(&url).await?;
                tracing::info!("Database connected...");
                Ok(Self::with_store(Arc::new(store), config))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, keeping events and results in memory");
                Ok(Self::in_memory(config))
            }
        }
    }
}

impl FromRef<AppState> for SharedEventLog {
    fn from_ref(state: &AppState) -> Self {
        state.events.clone()
    }
}

impl FromRef<AppState> for SharedResultStore {
    fn from_ref(state: &AppState) -> Self {
        state.results.clone()
    }
}

impl FromRef<AppState> for SharedAuthenticator {
    fn from_ref(state: &AppState) -> Self {
        state.credentials.clone()
    }
}

impl FromRef<AppState> for Arc<QuestionCatalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
