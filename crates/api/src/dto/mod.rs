pub mod record_path;

pub use record_path::{LookupPath, RecordPath};
