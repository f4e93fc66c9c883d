pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::{ApplicationRepository, InMemoryStore, JobRepository, PgStore};
use crate::middleware::auth::AuthSettings;
use crate::services::{application_service::ApplicationService, job_service::JobService};

/// Which persistence backend the running instance uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Memory => "memory",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub auth: AuthSettings,
    pub store_kind: StoreKind,
}

impl AppState {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
        auth: AuthSettings,
        store_kind: StoreKind,
    ) -> Self {
        let job_service = JobService::new(jobs.clone());
        let application_service = ApplicationService::new(applications, jobs);

        Self {
            job_service,
            application_service,
            auth,
            store_kind,
        }
    }

    pub fn postgres(store: PgStore, auth: AuthSettings) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store, auth, StoreKind::Postgres)
    }

    pub fn in_memory(store: InMemoryStore, auth: AuthSettings) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store, auth, StoreKind::Memory)
    }
}
