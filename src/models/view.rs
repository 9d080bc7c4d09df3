//! View-controller state exposed to clients

use serde::Serialize;
use utoipa::ToSchema;

use super::book::{Book, BookInput, BookSummary, FilterCriteria};
use super::similar::SimilarBook;

/// Screen currently shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Catalog,
    LoanManagement,
    BookDetail {
        #[serde(rename = "bookId")]
        book_id: String,
    },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Catalog => "catalog",
            View::LoanManagement => "loan_management",
            View::BookDetail { .. } => "book_detail",
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::Catalog
    }
}

/// Add/edit form state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FormMode {
    Closed,
    Add,
    Edit {
        #[serde(rename = "bookId")]
        book_id: String,
        prefill: BookInput,
    },
}

impl Default for FormMode {
    fn default() -> Self {
        FormMode::Closed
    }
}

/// Detail page of one book with its similar-books lookup state
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailPage {
    pub book: Book,
    pub loading: bool,
    pub error: Option<String>,
    pub similar_books: Vec<SimilarBook>,
}

/// Catalog page: visible books, author choices and the active filter
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub books: Vec<BookSummary>,
    pub authors: Vec<String>,
    pub filter: FilterCriteria,
}

/// Everything a client needs to render the current screen
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub view: View,
    pub form: FormMode,
    pub detail: Option<DetailPage>,
}
