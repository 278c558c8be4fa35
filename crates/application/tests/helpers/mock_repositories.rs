#![allow(dead_code)]

use async_trait::async_trait;
use futures::{stream, StreamExt};
use hatedns_application::ports::{RecordStore, RecordStream};
use hatedns_domain::{DomainError, RecordKey, RecordSet};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockRecordStore {
    records: Arc<RwLock<HashMap<RecordKey, RecordSet>>>,
    should_fail: Arc<RwLock<bool>>,
    get_calls: Arc<AtomicUsize>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_records(records: Vec<RecordSet>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.write().await;
            for rrset in records {
                map.insert(rrset.key().clone(), rrset);
            }
        }
        store
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError("Mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn get(&self, key: &RecordKey) -> Result<Option<RecordSet>, DomainError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure().await?;
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, rrset: &RecordSet) -> Result<(), DomainError> {
        self.check_failure().await?;
        self.records
            .write()
            .await
            .insert(rrset.key().clone(), rrset.clone());
        Ok(())
    }

    fn iterate(&self) -> RecordStream {
        let records = self.records.clone();
        let should_fail = self.should_fail.clone();
        Box::pin(stream::once(async move {
            if *should_fail.read().await {
                return stream::iter(vec![Err(DomainError::DatabaseError(
                    "Mock failure".to_string(),
                ))]);
            }
            let items: Vec<_> = records.read().await.values().cloned().map(Ok).collect();
            stream::iter(items)
        })
        .flatten())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.check_failure().await?;
        Ok(self.records.read().await.len() as u64)
    }
}
