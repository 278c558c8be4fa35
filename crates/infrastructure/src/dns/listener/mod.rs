pub mod framing;
mod tcp;
mod udp;

pub use tcp::TcpDnsListener;
pub use udp::UdpDnsListener;
