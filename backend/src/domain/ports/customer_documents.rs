//! Driving port for customer paperwork.

use crate::domain::{Download, ReceiptRequest, StatementRequest, User};

#[cfg_attr(test, mockall::automock)]
pub trait CustomerDocuments: Send + Sync {
    /// Waiver dated today.
    fn statement(&self, request: &StatementRequest) -> Download;

    /// Receipt issued now to `customer`.
    fn receipt(&self, customer: &User, request: &ReceiptRequest) -> Download;
}
