use crate::dns_record::name::qualify;
use crate::{DomainError, RecordClass, RecordKey, RecordType};
use std::fmt;

/// A question taken from a request message. Class and type are kept as raw
/// codes because clients may ask for values the store can never hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub class_code: u16,
    pub type_code: u16,
}

impl Question {
    pub fn new(name: &str, class_code: u16, type_code: u16) -> Result<Self, DomainError> {
        Ok(Self {
            name: qualify(name)?,
            class_code,
            type_code,
        })
    }

    /// Store key for this question, or `None` when the class or type can
    /// never be stored (unknown codes, `ANY`).
    pub fn key(&self) -> Option<RecordKey> {
        let class = RecordClass::from_u16(self.class_code)?;
        let record_type = RecordType::from_u16(self.type_code).filter(|t| t.is_storable())?;
        RecordKey::new(&self.name, class, record_type).ok()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = RecordClass::from_u16(self.class_code)
            .map(|c| c.to_string())
            .unwrap_or_else(|| format!("CLASS{}", self.class_code));
        let record_type = RecordType::from_u16(self.type_code)
            .map(|t| t.to_string())
            .unwrap_or_else(|| format!("TYPE{}", self.type_code));
        write!(f, "{} {} {}", self.name, class, record_type)
    }
}
