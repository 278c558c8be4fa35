pub mod builders;
pub mod dns_server;

pub use builders::{a_record_set, multi_query_bytes, query_bytes, record_set};
pub use dns_server::TestDnsServer;
