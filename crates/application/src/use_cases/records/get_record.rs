use crate::ports::RecordStore;
use hatedns_domain::{DomainError, RecordKey, RecordSet};
use std::sync::Arc;
use tracing::instrument;

pub struct GetRecordUseCase {
    store: Arc<dyn RecordStore>,
}

impl GetRecordUseCase {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, key: &RecordKey) -> Result<RecordSet, DomainError> {
        self.store
            .get(key)
            .await?
            .ok_or_else(|| DomainError::NotFound(key.to_string()))
    }
}
