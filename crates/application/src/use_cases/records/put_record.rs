use crate::ports::RecordStore;
use hatedns_domain::{DomainError, RecordSet};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct PutRecordUseCase {
    store: Arc<dyn RecordStore>,
}

impl PutRecordUseCase {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Inserts `rrset`, replacing whatever was stored under the same key.
    #[instrument(skip_all, fields(key = %rrset.key()))]
    pub async fn execute(&self, rrset: &RecordSet) -> Result<(), DomainError> {
        if !rrset.record_type().is_storable() {
            return Err(DomainError::UnsupportedRecordType(
                rrset.record_type().to_string(),
            ));
        }

        self.store.put(rrset).await?;

        info!(
            name = %rrset.name(),
            class = %rrset.class(),
            record_type = %rrset.record_type(),
            ttl = rrset.ttl(),
            rdata_count = rrset.rdata().len(),
            "Record set stored"
        );
        Ok(())
    }
}
