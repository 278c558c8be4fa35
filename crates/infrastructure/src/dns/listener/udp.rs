use crate::dns::handler::DnsQueryHandler;
use bytes::Bytes;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const RECV_BUFFER_SIZE: usize = 65535;

/// Serves DNS over UDP. Every datagram is handled in its own task, with at
/// most `max_in_flight` tasks alive at once.
pub struct UdpDnsListener {
    socket: Arc<UdpSocket>,
    handler: Arc<DnsQueryHandler>,
    in_flight: Arc<Semaphore>,
}

impl UdpDnsListener {
    pub fn new(socket: UdpSocket, handler: Arc<DnsQueryHandler>, max_in_flight: usize) -> Self {
        Self {
            socket: Arc::new(socket),
            handler,
            in_flight: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub async fn run(self, shutdown: CancellationToken) {
        let mut buf = vec![0u8; RECV_BUFFER_SIZE];

        loop {
            let permit = tokio::select! {
                _ = shutdown.cancelled() => break,
                permit = Arc::clone(&self.in_flight).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let received = tokio::select! {
                _ = shutdown.cancelled() => break,
                received = self.socket.recv_from(&mut buf) => received,
            };

            let (len, peer) = match received {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "UDP receive failed");
                    continue;
                }
            };

            let datagram = Bytes::copy_from_slice(&buf[..len]);
            let socket = Arc::clone(&self.socket);
            let handler = Arc::clone(&self.handler);

            tokio::spawn(async move {
                let _permit = permit;
                let Some(reply) = handler.handle_datagram(&datagram).await else {
                    return;
                };
                if let Err(e) = socket.send_to(&reply, peer).await {
                    debug!(peer = %peer, error = %e, "Failed to send UDP reply");
                }
            });
        }

        info!("UDP listener stopped");
    }
}
