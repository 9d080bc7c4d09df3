//! Loan model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::BookSummary;

pub const MIN_LOAN_WEEKS: u8 = 1;
pub const MAX_LOAN_WEEKS: u8 = 4;

/// Loan record. References a book by id, never owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(alias = "isbn13")]
    pub book_id: String,
    pub borrower: String,
    pub weeks: u8,
    pub due_date: DateTime<Utc>,
}

/// Loan period as typed into the form. Any JSON value is accepted; what
/// cannot be read as a number of weeks falls back to the minimum.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WeeksInput {
    Number(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Create loan request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoan {
    pub borrower: String,
    pub book_id: String,
    /// Loan period in weeks, clamped to 1..=4 (default 1)
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub weeks: Option<WeeksInput>,
}

/// Loan with the referenced book's title resolved for display
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub book_id: String,
    /// Book title, or the book id when the record is gone
    pub title: String,
    pub borrower: String,
    pub weeks: u8,
    pub due_date: DateTime<Utc>,
}

/// Loan management page
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanPage {
    pub eligible_books: Vec<BookSummary>,
    pub loans: Vec<LoanDetails>,
    pub all_borrowed: bool,
}
