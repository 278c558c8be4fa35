use async_trait::async_trait;
use futures::{stream, StreamExt};
use hatedns_application::ports::{RecordStore, RecordStream};
use hatedns_domain::{DomainError, RecordClass, RecordKey, RecordSet, RecordType};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, error, instrument};

/// Rdata values are persisted one per line. Canonical rdata text never
/// contains a line break.
const RDATA_SEPARATOR: char = '\n';

const PAGE_SIZE: i64 = 256;

type RecordRow = (String, String, String, i64, String);
type PagedRecordRow = (i64, String, String, String, i64, String);

pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_record_set(row: RecordRow) -> Result<RecordSet, DomainError> {
        let (name, rdclass, rdtype, ttl, rdatas) = row;
        let corrupt = |reason: String| {
            error!(name = %name, reason = %reason, "Stored record set cannot be decoded");
            DomainError::DatabaseError(format!(
                "corrupt record {} {} {}: {}",
                name, rdclass, rdtype, reason
            ))
        };

        let class = RecordClass::from_str(&rdclass).map_err(&corrupt)?;
        let record_type = RecordType::from_str(&rdtype).map_err(&corrupt)?;
        let ttl = u32::try_from(ttl).map_err(|_| corrupt(format!("ttl {} out of range", ttl)))?;

        RecordSet::from_text(&name, ttl, class, record_type, rdatas.split(RDATA_SEPARATOR))
            .map_err(|e| corrupt(e.to_string()))
    }

    async fn fetch_page(
        pool: &SqlitePool,
        after: i64,
    ) -> Result<Vec<PagedRecordRow>, DomainError> {
        sqlx::query_as::<_, PagedRecordRow>(
            "SELECT rowid, name, rdclass, rdtype, ttl, rdatas FROM record
             WHERE rowid > ? ORDER BY rowid LIMIT ?",
        )
        .bind(after)
        .bind(PAGE_SIZE)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to read record page");
            DomainError::DatabaseError(e.to_string())
        })
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &RecordKey) -> Result<Option<RecordSet>, DomainError> {
        let row = sqlx::query_as::<_, RecordRow>(
            "SELECT name, rdclass, rdtype, ttl, rdatas FROM record
             WHERE name = ? AND rdclass = ? AND rdtype = ?",
        )
        .bind(key.name())
        .bind(key.class().as_str())
        .bind(key.record_type().as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch record set");
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(Self::row_to_record_set).transpose()
    }

    #[instrument(skip(self, rrset), fields(key = %rrset.key()))]
    async fn put(&self, rrset: &RecordSet) -> Result<(), DomainError> {
        let rdatas = rrset.joined_rdata(&RDATA_SEPARATOR.to_string());

        sqlx::query(
            "INSERT INTO record (name, rdclass, rdtype, ttl, rdatas) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(name, rdclass, rdtype) DO UPDATE SET
                ttl = excluded.ttl,
                rdatas = excluded.rdatas",
        )
        .bind(rrset.name())
        .bind(rrset.class().as_str())
        .bind(rrset.record_type().as_str())
        .bind(i64::from(rrset.ttl()))
        .bind(&rdatas)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to store record set");
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!("Record set persisted");
        Ok(())
    }

    fn iterate(&self) -> RecordStream {
        let pool = self.pool.clone();

        stream::unfold(Some(0i64), move |cursor| {
            let pool = pool.clone();
            async move {
                let after = cursor?;
                let rows = match Self::fetch_page(&pool, after).await {
                    Ok(rows) => rows,
                    Err(e) => return Some((vec![Err(e)], None)),
                };
                if rows.is_empty() {
                    return None;
                }

                let next = if rows.len() < PAGE_SIZE as usize {
                    None
                } else {
                    rows.last().map(|row| row.0)
                };
                let page = rows
                    .into_iter()
                    .map(|(_, name, rdclass, rdtype, ttl, rdatas)| {
                        Self::row_to_record_set((name, rdclass, rdtype, ttl, rdatas))
                    })
                    .collect::<Vec<_>>();

                Some((page, next))
            }
        })
        .flat_map(stream::iter)
        .boxed()
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM record")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count record sets");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(count.max(0) as u64)
    }
}
