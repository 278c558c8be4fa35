use super::name::qualify;
use super::{RecordClass, RecordData, RecordType};
use crate::DomainError;
use std::fmt;

/// Store key of an RRset. The name is always in canonical lookup form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    name: String,
    class: RecordClass,
    record_type: RecordType,
}

impl RecordKey {
    pub fn new(
        name: &str,
        class: RecordClass,
        record_type: RecordType,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: qualify(name)?,
            class,
            record_type,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> RecordClass {
        self.class
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.class, self.record_type)
    }
}

/// A set of resource records sharing one (name, class, type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    key: RecordKey,
    ttl: u32,
    rdata: Vec<RecordData>,
}

impl RecordSet {
    /// Builds a validated RRset. Duplicate rdata values are collapsed, keeping
    /// the first occurrence.
    pub fn new(
        name: &str,
        class: RecordClass,
        record_type: RecordType,
        ttl: u32,
        rdata: Vec<RecordData>,
    ) -> Result<Self, DomainError> {
        if !record_type.is_storable() {
            return Err(DomainError::UnsupportedRecordType(format!(
                "{} cannot be stored",
                record_type
            )));
        }
        if rdata.is_empty() {
            return Err(DomainError::InvalidRdata(
                "an RRset needs at least one rdata value".to_string(),
            ));
        }

        let mut unique: Vec<RecordData> = Vec::with_capacity(rdata.len());
        for data in rdata {
            if data.record_type() != record_type {
                return Err(DomainError::InvalidRdata(format!(
                    "{} rdata in a {} RRset",
                    data.record_type(),
                    record_type
                )));
            }
            if !unique.contains(&data) {
                unique.push(data);
            }
        }

        Ok(Self {
            key: RecordKey::new(name, class, record_type)?,
            ttl,
            rdata: unique,
        })
    }

    /// Builds an RRset from presentation-form rdata values.
    pub fn from_text<'a>(
        name: &str,
        ttl: u32,
        class: RecordClass,
        record_type: RecordType,
        rdata: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, DomainError> {
        if !record_type.is_storable() {
            return Err(DomainError::UnsupportedRecordType(format!(
                "{} cannot be stored",
                record_type
            )));
        }
        let rdata = rdata
            .into_iter()
            .map(|text| RecordData::parse(record_type, text))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, class, record_type, ttl, rdata)
    }

    pub fn key(&self) -> &RecordKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        self.key.name()
    }

    pub fn class(&self) -> RecordClass {
        self.key.class()
    }

    pub fn record_type(&self) -> RecordType {
        self.key.record_type()
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn rdata(&self) -> &[RecordData] {
        &self.rdata
    }

    /// Presentation-form rdata joined by `separator`, as persisted.
    pub fn joined_rdata(&self, separator: &str) -> String {
        self.rdata
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// One `name ttl class type rdata` line per rdata value.
impl fmt::Display for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, data) in self.rdata.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(
                f,
                "{} {} {} {} {}",
                self.name(),
                self.ttl,
                self.class(),
                self.record_type(),
                data
            )?;
        }
        Ok(())
    }
}
