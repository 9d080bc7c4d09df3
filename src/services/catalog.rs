//! Catalog management service

use crate::{
    error::AppResult,
    models::{
        book::{BookInput, FilterCriteria},
        view::{CatalogPage, FormMode},
    },
};

use super::SessionHandle;

#[derive(Clone)]
pub struct CatalogService {
    handle: SessionHandle,
}

impl CatalogService {
    pub fn new(handle: SessionHandle) -> Self {
        Self { handle }
    }

    /// Visible books, author choices and the active filter
    pub async fn page(&self) -> CatalogPage {
        self.handle.lock().await.catalog_page()
    }

    pub async fn set_filter(&self, criteria: FilterCriteria) -> CatalogPage {
        let mut session = self.handle.lock().await;
        session.set_filter(criteria);
        session.catalog_page()
    }

    /// Add a new book and return its id
    pub async fn add_book(&self, input: BookInput) -> String {
        let mut session = self.handle.lock().await;
        let id = session.add_book(&input);
        self.handle.commit(&session).await;
        id
    }

    /// Update a book; unknown ids are ignored
    pub async fn update_book(&self, id: &str, input: BookInput) -> bool {
        let mut session = self.handle.lock().await;
        let updated = session.update_book(id, &input);
        if updated {
            self.handle.commit(&session).await;
        }
        updated
    }

    /// Delete a book together with its loans
    pub async fn delete_book(&self, id: &str) -> bool {
        let mut session = self.handle.lock().await;
        let deleted = session.delete_book(id).is_some();
        if deleted {
            self.handle.commit(&session).await;
        }
        deleted
    }

    pub async fn delete_selected(&self) -> Option<String> {
        let mut session = self.handle.lock().await;
        let deleted = session.delete_selected().map(|b| b.id);
        if deleted.is_some() {
            self.handle.commit(&session).await;
        }
        deleted
    }

    pub async fn toggle_select(&self, id: &str) -> CatalogPage {
        let mut session = self.handle.lock().await;
        session.toggle_select(id);
        self.handle.commit(&session).await;
        session.catalog_page()
    }

    pub async fn begin_add(&self) -> FormMode {
        let mut session = self.handle.lock().await;
        session.begin_add();
        FormMode::Add
    }

    /// Open the edit form on the selected book
    pub async fn begin_edit(&self) -> AppResult<FormMode> {
        let mut session = self.handle.lock().await;
        session.begin_edit().cloned()
    }

    pub async fn cancel_form(&self) {
        self.handle.lock().await.cancel_form();
    }

    /// Submit the open form; returns the affected book id if anything changed
    pub async fn submit_form(&self, input: BookInput) -> AppResult<Option<String>> {
        let mut session = self.handle.lock().await;
        let affected = session.submit_form(&input)?;
        if affected.is_some() {
            self.handle.commit(&session).await;
        }
        Ok(affected)
    }
}
