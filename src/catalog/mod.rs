//! Catalog/loan state core
//!
//! [`Catalog`] owns the book store and the loan ledger together so that a
//! book and the loans referencing it always leave in the same call. Derived
//! views (visible books, author list, eligibility) are recomputed on every
//! read and never cached.

pub mod books;
pub mod filter;
pub mod loans;

use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookInput, BookSummary, FilterCriteria},
        loan::{Loan, LoanDetails, WeeksInput},
    },
};

pub use books::BookStore;
pub use loans::LoanLedger;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: BookStore,
    loans: LoanLedger,
}

impl Catalog {
    pub fn new(books: BookStore, loans: LoanLedger) -> Self {
        Self { books, loans }
    }

    pub fn books(&self) -> &BookStore {
        &self.books
    }

    pub fn loans(&self) -> &LoanLedger {
        &self.loans
    }

    pub fn add_book(&mut self, input: &BookInput) -> String {
        self.books.add(input)
    }

    pub fn update_book(&mut self, id: &str, input: &BookInput) -> bool {
        self.books.update(id, input)
    }

    pub fn toggle_select(&mut self, id: &str) {
        self.books.toggle_select(id)
    }

    /// Delete a book and every loan referencing it
    pub fn delete_book(&mut self, id: &str) -> Option<Book> {
        let removed = self.books.delete(id)?;
        let dropped = self.loans.remove_for_book(id);
        tracing::info!("Deleted book id={} ({} loan(s) dropped)", id, dropped);
        Some(removed)
    }

    /// Delete the selected book, if any
    pub fn delete_selected(&mut self) -> Option<Book> {
        let id = self.books.selected()?.id.clone();
        self.delete_book(&id)
    }

    pub fn create_loan(
        &mut self,
        borrower: &str,
        book_id: &str,
        weeks: Option<&WeeksInput>,
        now: DateTime<Utc>,
    ) -> AppResult<Loan> {
        self.loans
            .create_loan(self.books.all(), borrower, book_id, weeks, now)
            .cloned()
    }

    pub fn is_on_loan(&self, book_id: &str) -> bool {
        loans::is_on_loan(book_id, self.loans.all())
    }

    pub fn distinct_authors(&self) -> Vec<String> {
        filter::distinct_authors(self.books.all())
    }

    /// Books visible under `criteria`, with derived loan status
    pub fn visible_books(&self, criteria: &FilterCriteria) -> Vec<BookSummary> {
        let on_loan = loans::on_loan_ids(self.loans.all());
        filter::apply_filter(self.books.all(), criteria)
            .into_iter()
            .map(|b| BookSummary::new(b, on_loan.contains(b.id.as_str())))
            .collect()
    }

    pub fn eligible_for_loan(&self) -> Vec<BookSummary> {
        loans::eligible_for_loan(self.books.all(), self.loans.all())
            .into_iter()
            .map(|b| BookSummary::new(b, false))
            .collect()
    }

    /// Loans in creation order with book titles resolved
    pub fn loan_details(&self) -> Vec<LoanDetails> {
        self.loans
            .all()
            .iter()
            .map(|loan| LoanDetails {
                book_id: loan.book_id.clone(),
                title: self
                    .books
                    .get(&loan.book_id)
                    .map(|b| b.title.clone())
                    .unwrap_or_else(|| loan.book_id.clone()),
                borrower: loan.borrower.clone(),
                weeks: loan.weeks,
                due_date: loan.due_date,
            })
            .collect()
    }
}
