//! Screen transitions and the detail-view similar-books fetch

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{similar::LookupOutcome, view::ViewState},
};

use super::{
    session::{LookupTicket, LOOKUP_FAILED_MESSAGE},
    similar::{query_for_title, select_similar, SimilarBooksLookup},
    SessionHandle,
};

#[derive(Clone)]
pub struct ViewService {
    handle: SessionHandle,
    lookup: Arc<dyn SimilarBooksLookup>,
    max_results: usize,
}

impl ViewService {
    pub fn new(handle: SessionHandle, lookup: Arc<dyn SimilarBooksLookup>, max_results: usize) -> Self {
        Self {
            handle,
            lookup,
            max_results,
        }
    }

    pub async fn state(&self) -> ViewState {
        self.handle.lock().await.view_state()
    }

    pub async fn manage_loans(&self) -> AppResult<ViewState> {
        let mut session = self.handle.lock().await;
        session.manage_loans()?;
        Ok(session.view_state())
    }

    pub async fn quit_loans(&self) -> AppResult<ViewState> {
        let mut session = self.handle.lock().await;
        session.quit_loans()?;
        Ok(session.view_state())
    }

    pub async fn dismiss_details(&self) -> AppResult<ViewState> {
        let mut session = self.handle.lock().await;
        session.dismiss_details()?;
        Ok(session.view_state())
    }

    /// Open the detail view and start the similar-books fetch in the background.
    /// The returned state shows the lookup as loading.
    pub async fn open_details(&self, book_id: &str) -> AppResult<ViewState> {
        let (ticket, title) = {
            let mut session = self.handle.lock().await;
            let ticket = session.open_details(book_id)?;
            let title = session
                .catalog()
                .books()
                .get(book_id)
                .map(|b| b.title.clone())
                .unwrap_or_default();
            (ticket, title)
        };

        let service = self.clone();
        let book_id = book_id.to_string();
        tokio::spawn(async move {
            service.fetch_similar(ticket, &book_id, &title).await;
        });

        Ok(self.state().await)
    }

    /// Run one lookup and apply it if the detail view is still the one that asked
    pub async fn fetch_similar(&self, ticket: LookupTicket, book_id: &str, title: &str) -> bool {
        let query = query_for_title(title);
        let outcome = match self.lookup.search(&query).await {
            Ok(results) => LookupOutcome::Found(select_similar(results, book_id, self.max_results)),
            Err(e) => {
                tracing::warn!("Similar books lookup for {:?} failed: {}", query, e);
                LookupOutcome::Failed(LOOKUP_FAILED_MESSAGE.to_string())
            }
        };
        self.handle.lock().await.apply_similar_books(ticket, outcome)
    }
}
