//! Loan ledger: loan records, eligibility and due dates

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        loan::{Loan, WeeksInput, MAX_LOAN_WEEKS, MIN_LOAN_WEEKS},
    },
};

/// Loans in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanLedger {
    loans: Vec<Loan>,
}

impl LoanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_loans(loans: Vec<Loan>) -> Self {
        Self { loans }
    }

    pub fn all(&self) -> &[Loan] {
        &self.loans
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    /// Record a loan of `book_id`, which must be eligible in `books`.
    /// Returns the stored loan.
    pub fn create_loan(
        &mut self,
        books: &[Book],
        borrower: &str,
        book_id: &str,
        weeks: Option<&WeeksInput>,
        now: DateTime<Utc>,
    ) -> AppResult<&Loan> {
        let borrower = borrower.trim();
        if borrower.is_empty() {
            return Err(AppError::Validation("Borrower name is required".to_string()));
        }
        if !eligible_for_loan(books, &self.loans)
            .iter()
            .any(|b| b.id == book_id)
        {
            return Err(AppError::Validation(format!(
                "Book {} is not available for loan",
                book_id
            )));
        }

        let weeks = clamp_weeks(weeks);
        let loan = Loan {
            book_id: book_id.to_string(),
            borrower: borrower.to_string(),
            weeks,
            due_date: due_date(now, weeks),
        };
        tracing::info!(
            "Loan created: book={} borrower={:?} weeks={} due={}",
            loan.book_id,
            loan.borrower,
            loan.weeks,
            loan.due_date
        );
        self.loans.push(loan);
        Ok(&self.loans[self.loans.len() - 1])
    }

    /// Drop every loan of `book_id`; returns how many were removed
    pub fn remove_for_book(&mut self, book_id: &str) -> usize {
        let before = self.loans.len();
        self.loans.retain(|l| l.book_id != book_id);
        before - self.loans.len()
    }
}

/// Ids of every book referenced by a loan
pub fn on_loan_ids(loans: &[Loan]) -> HashSet<&str> {
    loans.iter().map(|l| l.book_id.as_str()).collect()
}

pub fn is_on_loan(book_id: &str, loans: &[Loan]) -> bool {
    loans.iter().any(|l| l.book_id == book_id)
}

/// User-added books no loan references, in book order
pub fn eligible_for_loan<'a>(books: &'a [Book], loans: &[Loan]) -> Vec<&'a Book> {
    let on_loan = on_loan_ids(loans);
    books
        .iter()
        .filter(|b| b.is_user_added && !on_loan.contains(b.id.as_str()))
        .collect()
}

pub fn due_date(start: DateTime<Utc>, weeks: u8) -> DateTime<Utc> {
    start + Duration::days(i64::from(weeks) * 7)
}

/// Resolve the requested loan period to 1..=4 weeks; anything unusable means 1
pub fn clamp_weeks(raw: Option<&WeeksInput>) -> u8 {
    let requested = match raw {
        Some(WeeksInput::Number(n)) => Some(*n),
        // Truncates toward zero; the cast saturates out-of-range values
        Some(WeeksInput::Float(f)) => Some(f.trunc() as i64),
        Some(WeeksInput::Text(s)) => parse_leading_int(s),
        Some(WeeksInput::Other(_)) | None => None,
    };
    match requested {
        None | Some(0) => MIN_LOAN_WEEKS,
        Some(n) => n.clamp(i64::from(MIN_LOAN_WEEKS), i64::from(MAX_LOAN_WEEKS)) as u8,
    }
}

/// Lenient integer parse: optional sign and leading digits, rest ignored.
/// Saturates on overflow.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
