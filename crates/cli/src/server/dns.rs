use hatedns_domain::config::ServerConfig;
use hatedns_infrastructure::dns::{DnsQueryHandler, TcpDnsListener, UdpDnsListener};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Binds UDP and TCP on `bind_addr` and spawns both listeners. Binding
/// happens before returning so address errors surface at startup.
pub fn start_dns_server(
    bind_addr: SocketAddr,
    handler: Arc<DnsQueryHandler>,
    server: &ServerConfig,
    shutdown: CancellationToken,
) -> anyhow::Result<JoinSet<()>> {
    let domain = if bind_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let tcp_idle_timeout = server.tcp_idle_timeout();
    let udp = UdpDnsListener::new(
        create_udp_socket(domain, bind_addr)?,
        handler.clone(),
        server.udp_max_in_flight,
    );
    let tcp = TcpDnsListener::new(
        create_tcp_listener(domain, bind_addr)?,
        handler,
        tcp_idle_timeout,
    );

    info!(
        bind_address = %bind_addr,
        max_in_flight = server.udp_max_in_flight,
        "DNS server listening on UDP"
    );
    info!(
        bind_address = %bind_addr,
        idle_timeout_secs = tcp_idle_timeout.map(|t| t.as_secs()),
        "DNS server listening on TCP"
    );

    let mut join_set = JoinSet::new();
    join_set.spawn(udp.run(shutdown.clone()));
    join_set.spawn(tcp.run(shutdown));
    Ok(join_set)
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
