pub mod name;
mod record_class;
mod record_data;
mod record_set;
mod record_type;

pub use record_class::RecordClass;
pub use record_data::RecordData;
pub use record_set::{RecordKey, RecordSet};
pub use record_type::RecordType;
