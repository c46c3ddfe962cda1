use axum::{
    http::{header::CONTENT_TYPE, Method},
    Router,
};
use bruteguard_core::stop_flag::StopFlag;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Binds `bind_address` and serves `router` until the stop flag fires.
pub async fn setup_http_server(
    name: &'static str,
    router: Router,
    bind_address: &str,
    stop_flag: StopFlag,
) -> anyhow::Result<tokio::task::JoinHandle<anyhow::Result<()>>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let app = router.layer(cors).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("{} server listening on {}", name, listener.local_addr()?);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                stop_flag.wait().await;
                info!("Stop flag was set, shutting down {} server gracefully", name);
            })
            .await?;
        info!("{} server is down", name);
        Ok::<(), anyhow::Error>(())
    });

    Ok(handle)
}
