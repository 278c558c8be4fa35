use super::UseCases;
use hatedns_infrastructure::dns::DnsQueryHandler;
use std::sync::Arc;

pub struct DnsServices {
    pub handler: Arc<DnsQueryHandler>,
}

impl DnsServices {
    pub fn new(use_cases: &UseCases) -> Self {
        Self {
            handler: Arc::new(DnsQueryHandler::new(use_cases.resolve_query.clone())),
        }
    }
}
