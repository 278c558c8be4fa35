use clap::Parser;
use hatedns_domain::CliOverrides;
use std::net::{IpAddr, SocketAddr};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "hatedns")]
#[command(version)]
#[command(about = "The DNS server for those who hate DNS")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// SQLite database path, or ":memory:" for a volatile store
    #[arg(long, value_name = "PATH")]
    db: Option<String>,

    /// Address the DNS and HTTP servers bind to
    #[arg(long)]
    host: Option<String>,

    /// UDP and TCP port for DNS
    #[arg(long)]
    dns_port: Option<u16>,

    /// Port for the record API
    #[arg(long)]
    http_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        web_port: cli.http_port,
        bind_address: cli.host,
        database_path: cli.db,
        log_level: cli.log_level,
    };
    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    info!("Starting hatedns v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool);
    repos.log_record_count().await;
    let use_cases = di::UseCases::new(&repos);
    let dns_services = di::DnsServices::new(&use_cases);
    let app_state = di::app_state(&use_cases, &config);

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);
    let web_addr = SocketAddr::new(bind_ip, config.server.web_port);

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));

    let mut dns_tasks = server::start_dns_server(
        dns_addr,
        dns_services.handler,
        &config.server,
        shutdown.clone(),
    )?;

    let web_result = server::start_web_server(web_addr, app_state, shutdown.clone()).await;
    if let Err(e) = &web_result {
        error!(error = %e, "Web server error");
    }

    shutdown.cancel();
    while dns_tasks.join_next().await.is_some() {}

    info!("Server shutdown complete");
    web_result
}

async fn cancel_on_ctrl_c(shutdown: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
    }
    shutdown.cancel();
}
