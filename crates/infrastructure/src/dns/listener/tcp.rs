use super::framing::{read_frame, write_frame};
use crate::dns::handler::DnsQueryHandler;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Serves DNS over TCP with 2-byte length framing. Each connection runs in
/// its own task and may carry any number of sequential queries.
pub struct TcpDnsListener {
    listener: TcpListener,
    handler: Arc<DnsQueryHandler>,
    idle_timeout: Option<Duration>,
}

impl TcpDnsListener {
    /// `idle_timeout` bounds the wait for each complete frame; `None`
    /// waits forever.
    pub fn new(
        listener: TcpListener,
        handler: Arc<DnsQueryHandler>,
        idle_timeout: Option<Duration>,
    ) -> Self {
        Self {
            listener,
            handler,
            idle_timeout,
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn run(self, shutdown: CancellationToken) {
        loop {
            let accepted = tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = self.listener.accept() => accepted,
            };

            match accepted {
                Ok((stream, peer)) => {
                    let connection = Connection {
                        stream,
                        peer,
                        handler: Arc::clone(&self.handler),
                        idle_timeout: self.idle_timeout,
                    };
                    tokio::spawn(connection.serve(shutdown.child_token()));
                }
                Err(e) => warn!(error = %e, "TCP accept failed"),
            }
        }

        info!("TCP listener stopped");
    }
}

struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsQueryHandler>,
    idle_timeout: Option<Duration>,
}

impl Connection {
    async fn serve(mut self, shutdown: CancellationToken) {
        debug!(peer = %self.peer, "TCP connection opened");

        loop {
            let frame = tokio::select! {
                _ = shutdown.cancelled() => break,
                frame = self.next_frame() => frame,
            };

            let frame = match frame {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e) => {
                    debug!(peer = %self.peer, error = %e, "TCP read failed");
                    break;
                }
            };

            let Some(reply) = self.handler.handle_frame(&frame).await else {
                break;
            };
            if let Err(e) = write_frame(&mut self.stream, &reply).await {
                debug!(peer = %self.peer, error = %e, "TCP write failed");
                break;
            }
        }

        debug!(peer = %self.peer, "TCP connection closed");
    }

    async fn next_frame(&mut self) -> io::Result<Option<Vec<u8>>> {
        match self.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, read_frame(&mut self.stream)).await {
                Ok(frame) => frame,
                Err(_) => {
                    debug!(peer = %self.peer, "TCP connection idle, closing");
                    Ok(None)
                }
            },
            None => read_frame(&mut self.stream).await,
        }
    }
}
