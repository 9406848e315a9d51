//! Customer paperwork implementing [`CustomerDocuments`].

use std::sync::Arc;

use mockable::Clock;

use super::ports::CustomerDocuments;
use super::{Download, ReceiptRequest, StatementRequest, User};

#[derive(Clone)]
pub struct DocumentService {
    clock: Arc<dyn Clock>,
}

impl DocumentService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl CustomerDocuments for DocumentService {
    fn statement(&self, request: &StatementRequest) -> Download {
        request.render(self.clock.local().date_naive())
    }

    fn receipt(&self, customer: &User, request: &ReceiptRequest) -> Download {
        request.render(customer.username.as_ref(), self.clock.local().naive_local())
    }
}
