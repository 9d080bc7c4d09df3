//! View controller: screen state, form flow and detail-view lookups
//!
//! A [`Session`] owns the catalog core plus all UI state that used to live in
//! ambient globals. Every user action is a method call; the caller commits
//! the catalog to storage afterwards.

use chrono::Utc;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{
        book::{Book, BookInput, FilterCriteria},
        loan::{CreateLoan, Loan, LoanPage},
        similar::{LookupOutcome, SimilarBook},
        view::{CatalogPage, DetailPage, FormMode, View, ViewState},
    },
};

pub const LOOKUP_FAILED_MESSAGE: &str = "Failed to load similar books";

/// Identifies one opening of the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

#[derive(Debug, Clone, Default)]
struct DetailState {
    loading: bool,
    error: Option<String>,
    similar_books: Vec<SimilarBook>,
}

#[derive(Debug, Default)]
pub struct Session {
    catalog: Catalog,
    filter: FilterCriteria,
    view: View,
    form: FormMode,
    detail: DetailState,
    generation: u64,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    // Catalog actions

    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        tracing::debug!("Filter set to author={:?}", criteria.author);
        self.filter = criteria;
    }

    pub fn add_book(&mut self, input: &BookInput) -> String {
        let id = self.catalog.add_book(input);
        tracing::info!("Book added id={}", id);
        id
    }

    pub fn update_book(&mut self, id: &str, input: &BookInput) -> bool {
        self.catalog.update_book(id, input)
    }

    pub fn toggle_select(&mut self, id: &str) {
        self.catalog.toggle_select(id)
    }

    pub fn delete_book(&mut self, id: &str) -> Option<Book> {
        let removed = self.catalog.delete_book(id);
        if removed.is_some() {
            self.forget_book(id);
        }
        removed
    }

    pub fn delete_selected(&mut self) -> Option<Book> {
        let removed = self.catalog.delete_selected()?;
        self.forget_book(&removed.id);
        Some(removed)
    }

    /// Close any form or detail view still pointing at a deleted book
    fn forget_book(&mut self, id: &str) {
        if matches!(&self.form, FormMode::Edit { book_id, .. } if book_id == id) {
            self.form = FormMode::Closed;
        }
        if matches!(&self.view, View::BookDetail { book_id } if book_id == id) {
            self.close_details();
        }
    }

    // Form flow

    pub fn begin_add(&mut self) {
        self.form = FormMode::Add;
    }

    /// Open the form on the selected book. Seeded records are never editable.
    pub fn begin_edit(&mut self) -> AppResult<&FormMode> {
        let book = self
            .catalog
            .books()
            .selected()
            .filter(|b| b.is_user_added)
            .ok_or_else(|| AppError::Validation("Please select a book to edit".to_string()))?;
        self.form = FormMode::Edit {
            book_id: book.id.clone(),
            prefill: BookInput::from(book),
        };
        Ok(&self.form)
    }

    pub fn cancel_form(&mut self) {
        self.form = FormMode::Closed;
    }

    /// Add or update according to the form mode, then close the form.
    /// Returns the id of the affected book, or `None` if nothing changed.
    /// Fails without touching anything when no form is open.
    pub fn submit_form(&mut self, input: &BookInput) -> AppResult<Option<String>> {
        match std::mem::take(&mut self.form) {
            FormMode::Closed => Err(AppError::Validation("No form is open".to_string())),
            FormMode::Add => Ok(Some(self.add_book(input))),
            FormMode::Edit { book_id, .. } => {
                Ok(self.update_book(&book_id, input).then_some(book_id))
            }
        }
    }

    // Loans

    pub fn create_loan(&mut self, request: &CreateLoan) -> AppResult<Loan> {
        self.catalog
            .create_loan(&request.borrower, &request.book_id, request.weeks.as_ref(), Utc::now())
    }

    // View transitions

    pub fn manage_loans(&mut self) -> AppResult<&View> {
        self.transition(View::LoanManagement)
    }

    pub fn quit_loans(&mut self) -> AppResult<&View> {
        match self.view {
            View::LoanManagement => {
                self.view = View::Catalog;
                Ok(&self.view)
            }
            _ => Err(self.invalid(&View::Catalog)),
        }
    }

    /// Show the detail page of `book_id` and hand out the ticket its lookup must present
    pub fn open_details(&mut self, book_id: &str) -> AppResult<LookupTicket> {
        let target = View::BookDetail {
            book_id: book_id.to_string(),
        };
        if self.view != View::Catalog {
            return Err(self.invalid(&target));
        }
        let shown = self
            .catalog
            .books()
            .get(book_id)
            .is_some_and(|b| b.is_user_added);
        if !shown {
            return Err(AppError::NotFound(format!("Book with id {} not found", book_id)));
        }
        self.view = target;
        self.generation += 1;
        self.detail = DetailState {
            loading: true,
            ..Default::default()
        };
        Ok(LookupTicket(self.generation))
    }

    pub fn dismiss_details(&mut self) -> AppResult<&View> {
        match self.view {
            View::BookDetail { .. } => {
                self.close_details();
                Ok(&self.view)
            }
            _ => Err(self.invalid(&View::Catalog)),
        }
    }

    fn close_details(&mut self) {
        self.view = View::Catalog;
        self.generation += 1;
        self.detail = DetailState::default();
    }

    /// Store lookup results if `ticket` still matches the open detail view
    pub fn apply_similar_books(&mut self, ticket: LookupTicket, outcome: LookupOutcome) -> bool {
        let active = matches!(self.view, View::BookDetail { .. }) && ticket.0 == self.generation;
        if !active {
            tracing::debug!("Discarding stale similar-books result");
            return false;
        }
        self.detail.loading = false;
        match outcome {
            LookupOutcome::Found(books) => {
                self.detail.error = None;
                self.detail.similar_books = books;
            }
            LookupOutcome::Failed(message) => {
                self.detail.error = Some(message);
                self.detail.similar_books.clear();
            }
        }
        true
    }

    fn transition(&mut self, target: View) -> AppResult<&View> {
        if self.view != View::Catalog {
            return Err(self.invalid(&target));
        }
        self.view = target;
        Ok(&self.view)
    }

    fn invalid(&self, target: &View) -> AppError {
        AppError::InvalidTransition {
            from: self.view.name(),
            to: target.name(),
        }
    }

    // Read models

    pub fn catalog_page(&self) -> CatalogPage {
        CatalogPage {
            books: self.catalog.visible_books(&self.filter),
            authors: self.catalog.distinct_authors(),
            filter: self.filter.clone(),
        }
    }

    pub fn loan_page(&self) -> LoanPage {
        let eligible_books = self.catalog.eligible_for_loan();
        LoanPage {
            all_borrowed: eligible_books.is_empty(),
            eligible_books,
            loans: self.catalog.loan_details(),
        }
    }

    pub fn view_state(&self) -> ViewState {
        let detail = match &self.view {
            View::BookDetail { book_id } => {
                self.catalog.books().get(book_id).map(|book| DetailPage {
                    book: book.clone(),
                    loading: self.detail.loading,
                    error: self.detail.error.clone(),
                    similar_books: self.detail.similar_books.clone(),
                })
            }
            _ => None,
        };
        ViewState {
            view: self.view.clone(),
            form: self.form.clone(),
            detail,
        }
    }
}
