//! Data models for Bookcat

pub mod book;
pub mod loan;
pub mod similar;
pub mod view;

// Re-export commonly used types
pub use book::{Book, BookInput, BookSummary, FilterCriteria};
pub use loan::{CreateLoan, Loan, LoanDetails, LoanPage, WeeksInput};
pub use similar::{LookupOutcome, SimilarBook};
pub use view::{CatalogPage, DetailPage, FormMode, View, ViewState};
