use hatedns_api::{create_api_routes, AppState};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn start_web_server(
    bind_addr: SocketAddr,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = create_api_routes(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!(url = format!("http://{}", bind_addr), "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    Ok(())
}
