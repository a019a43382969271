use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryProfileDirectory};
use crate::routes::with_profile_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fincoach::config::AppConfig;
use fincoach::error::AppError;
use fincoach::profile::{FormTemplateCatalog, OnboardingService};
use fincoach::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = load_catalog(&config)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryProfileDirectory::default());
    let onboarding_service = Arc::new(OnboardingService::new(directory, catalog));

    let app = with_profile_routes(onboarding_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "financial coaching portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_catalog(config: &AppConfig) -> Result<FormTemplateCatalog, AppError> {
    let mut catalog = FormTemplateCatalog::builtin();
    if let Some(path) = &config.forms.template_file {
        let file = std::fs::File::open(path)?;
        let added = catalog.load_overlay(file)?;
        info!(count = added, path = %path.display(), "loaded form template overlay");
    }
    Ok(catalog)
}
