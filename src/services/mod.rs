//! Business logic services

pub mod catalog;
pub mod loans;
pub mod session;
pub mod similar;
pub mod view;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::{config::LookupConfig, repository::Repository};

use self::{session::Session, similar::SimilarBooksLookup};

/// The single session shared by all handlers, plus the storage it commits to.
///
/// Handlers hold the session lock for their whole mutation and commit, so
/// actions never interleave.
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<Mutex<Session>>,
    repository: Repository,
}

impl SessionHandle {
    pub fn new(session: Session, repository: Repository) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            repository,
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }

    /// Persist the session's catalog. Failures are logged, never returned.
    pub async fn commit(&self, session: &Session) {
        if let Err(e) = self.repository.save_catalog(session.catalog()).await {
            tracing::warn!("Failed to persist catalog: {}", e);
        }
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub view: view::ViewService,
}

impl Services {
    /// Load the catalog from storage and build all services around one session
    pub async fn new(
        repository: Repository,
        lookup: Arc<dyn SimilarBooksLookup>,
        lookup_config: &LookupConfig,
    ) -> Self {
        let catalog = repository.load_catalog().await;
        let handle = SessionHandle::new(Session::new(catalog), repository);
        Self {
            catalog: catalog::CatalogService::new(handle.clone()),
            loans: loans::LoansService::new(handle.clone()),
            view: view::ViewService::new(handle, lookup, lookup_config.max_results),
        }
    }
}
