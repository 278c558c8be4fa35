use thiserror::Error;

/// Coarse failure classes. Each transport maps these onto its own status
/// vocabulary (DNS response codes, HTTP status codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    MalformedInput,
    UnsupportedOperation,
    InternalFault,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("Invalid record class: {0}")]
    InvalidRecordClass(String),

    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    #[error("Invalid rdata: {0}")]
    InvalidRdata(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound(_) => ErrorKind::NotFound,

            DomainError::InvalidDomainName(_)
            | DomainError::InvalidRecordType(_)
            | DomainError::InvalidRecordClass(_)
            | DomainError::InvalidTtl(_)
            | DomainError::InvalidRdata(_)
            | DomainError::MalformedMessage(_) => ErrorKind::MalformedInput,

            DomainError::UnsupportedRecordType(_) => ErrorKind::UnsupportedOperation,

            DomainError::DatabaseError(_) | DomainError::Internal(_) => ErrorKind::InternalFault,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
