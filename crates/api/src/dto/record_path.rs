//! Positional path grammar of the record API.
//!
//! Writes take `name/rdata`, `name/type/rdata`, `name/ttl/type/rdata` or
//! `name/ttl/class/type/rdata`; lookups take `name`, `name/type` or
//! `name/class/type`. Omitted positions fall back to class `IN`, type `A`
//! and the configured default TTL.

use hatedns_domain::config::RecordsConfig;
use hatedns_domain::{DomainError, RecordClass, RecordKey, RecordSet, RecordType};
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub struct RecordPath<'a> {
    pub name: &'a str,
    pub ttl: Option<&'a str>,
    pub class: Option<&'a str>,
    pub record_type: Option<&'a str>,
    pub rdata: &'a str,
}

impl<'a> RecordPath<'a> {
    pub fn new(name: &'a str, rdata: &'a str) -> Self {
        Self {
            name,
            ttl: None,
            class: None,
            record_type: None,
            rdata,
        }
    }

    pub fn with_ttl(mut self, ttl: &'a str) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_type(mut self, record_type: &'a str) -> Self {
        self.record_type = Some(record_type);
        self
    }

    /// Builds the RRset to store. Rdata values are split on the configured
    /// separator.
    pub fn into_record_set(self, defaults: &RecordsConfig) -> Result<RecordSet, DomainError> {
        let ttl = match self.ttl {
            Some(ttl) => parse_ttl(ttl)?,
            None => defaults.default_ttl,
        };

        RecordSet::from_text(
            self.name,
            ttl,
            parse_class(self.class)?,
            parse_type(self.record_type)?,
            self.rdata.split(defaults.rdata_separator.as_str()),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LookupPath<'a> {
    pub name: &'a str,
    pub class: Option<&'a str>,
    pub record_type: Option<&'a str>,
}

impl<'a> LookupPath<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            class: None,
            record_type: None,
        }
    }

    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_type(mut self, record_type: &'a str) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn into_key(self) -> Result<RecordKey, DomainError> {
        RecordKey::new(
            self.name,
            parse_class(self.class)?,
            parse_type(self.record_type)?,
        )
    }
}

fn parse_ttl(text: &str) -> Result<u32, DomainError> {
    text.parse::<u32>()
        .map_err(|_| DomainError::InvalidTtl(format!("{:?} is not a TTL in seconds", text)))
}

fn parse_class(text: Option<&str>) -> Result<RecordClass, DomainError> {
    text.map_or(Ok(RecordClass::IN), |class| {
        RecordClass::from_str(class).map_err(DomainError::InvalidRecordClass)
    })
}

fn parse_type(text: Option<&str>) -> Result<RecordType, DomainError> {
    text.map_or(Ok(RecordType::A), |record_type| {
        RecordType::from_str(record_type).map_err(DomainError::InvalidRecordType)
    })
}
