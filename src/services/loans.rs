//! Loan management service

use crate::{
    error::AppResult,
    models::loan::{CreateLoan, Loan, LoanPage},
};

use super::SessionHandle;

#[derive(Clone)]
pub struct LoansService {
    handle: SessionHandle,
}

impl LoansService {
    pub fn new(handle: SessionHandle) -> Self {
        Self { handle }
    }

    /// Eligible books and current loans
    pub async fn page(&self) -> LoanPage {
        self.handle.lock().await.loan_page()
    }

    /// Create a new loan for an eligible book
    pub async fn create_loan(&self, request: CreateLoan) -> AppResult<Loan> {
        let mut session = self.handle.lock().await;
        let loan = session.create_loan(&request)?;
        self.handle.commit(&session).await;
        Ok(loan)
    }
}
