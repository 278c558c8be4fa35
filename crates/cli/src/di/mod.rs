mod dns;
mod repositories;
mod use_cases;

pub use dns::DnsServices;
pub use repositories::Repositories;
pub use use_cases::{app_state, UseCases};
