use async_trait::async_trait;
use futures::stream::BoxStream;
use hatedns_domain::{DomainError, RecordKey, RecordSet};

pub type RecordStream = BoxStream<'static, Result<RecordSet, DomainError>>;

/// Keyed table of RRsets, the single source of truth for answers.
///
/// At most one RRset exists per (name, class, type); `put` replaces it
/// whole. Implementations must be safe to share between the DNS listeners
/// and the administrative API.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, key: &RecordKey) -> Result<Option<RecordSet>, DomainError>;

    /// Upsert. Durable (for durable backends) once this returns.
    async fn put(&self, rrset: &RecordSet) -> Result<(), DomainError>;

    /// Lazily yields every stored RRset. Writes made while the stream is
    /// being consumed may or may not be observed.
    fn iterate(&self) -> RecordStream;

    async fn count(&self) -> Result<u64, DomainError>;
}
