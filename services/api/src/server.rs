use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use speech_report::config::AppConfig;
use speech_report::error::AppError;
use speech_report::sources::PoliticianSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let source = config.source.resolve(None, None)?;
    match &source {
        Some(source) => info!(
            path = %source.path().display(),
            format = source.format().label(),
            "serving reports for configured politician export"
        ),
        None => info!("no politician export configured; only POST reports are available"),
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        source: source.map(|source| Arc::new(source) as Arc<dyn PoliticianSource>),
    };

    let app = service_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "speech report service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
