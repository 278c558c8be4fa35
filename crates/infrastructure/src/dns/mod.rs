pub mod codec;
pub mod handler;
pub mod listener;

pub use handler::DnsQueryHandler;
pub use listener::{TcpDnsListener, UdpDnsListener};
