#![allow(dead_code)]
use hatedns_application::ports::RecordStore;
use hatedns_application::use_cases::ResolveQueryUseCase;
use hatedns_domain::config::DatabaseConfig;
use hatedns_domain::RecordSet;
use hatedns_infrastructure::database::create_pool;
use hatedns_infrastructure::dns::{DnsQueryHandler, TcpDnsListener, UdpDnsListener};
use hatedns_infrastructure::repositories::SqliteRecordStore;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Both listeners on ephemeral loopback ports over an in-memory store.
pub struct TestDnsServer {
    pub udp_addr: SocketAddr,
    pub tcp_addr: SocketAddr,
    pub store: Arc<SqliteRecordStore>,
    pub pool: SqlitePool,
    pub shutdown: CancellationToken,
    pub udp_task: JoinHandle<()>,
    pub tcp_task: JoinHandle<()>,
}

impl TestDnsServer {
    pub async fn start(records: Vec<RecordSet>) -> Self {
        Self::start_with_idle_timeout(records, Some(Duration::from_secs(30))).await
    }

    pub async fn start_with_idle_timeout(
        records: Vec<RecordSet>,
        idle_timeout: Option<Duration>,
    ) -> Self {
        Self::start_with(records, idle_timeout, 1024).await
    }

    pub async fn start_with_udp_limit(records: Vec<RecordSet>, max_in_flight: usize) -> Self {
        Self::start_with(records, Some(Duration::from_secs(30)), max_in_flight).await
    }

    async fn start_with(
        records: Vec<RecordSet>,
        idle_timeout: Option<Duration>,
        max_in_flight: usize,
    ) -> Self {
        let pool = create_pool(&DatabaseConfig::default()).await.unwrap();
        let store = Arc::new(SqliteRecordStore::new(pool.clone()));
        for rrset in &records {
            store.put(rrset).await.unwrap();
        }

        let resolver = Arc::new(ResolveQueryUseCase::new(store.clone()));
        let handler = Arc::new(DnsQueryHandler::new(resolver));

        let udp = UdpDnsListener::new(
            UdpSocket::bind("127.0.0.1:0").await.unwrap(),
            handler.clone(),
            max_in_flight,
        );
        let tcp = TcpDnsListener::new(
            TcpListener::bind("127.0.0.1:0").await.unwrap(),
            handler,
            idle_timeout,
        );
        let udp_addr = udp.local_addr().unwrap();
        let tcp_addr = tcp.local_addr().unwrap();

        let shutdown = CancellationToken::new();
        let udp_task = tokio::spawn(udp.run(shutdown.clone()));
        let tcp_task = tokio::spawn(tcp.run(shutdown.clone()));

        Self {
            udp_addr,
            tcp_addr,
            store,
            pool,
            shutdown,
            udp_task,
            tcp_task,
        }
    }
}
