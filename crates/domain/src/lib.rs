//! hatedns domain layer
pub mod config;
pub mod dns_question;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config};
pub use dns_question::Question;
pub use dns_record::{RecordClass, RecordData, RecordKey, RecordSet, RecordType};
pub use errors::{DomainError, ErrorKind};
