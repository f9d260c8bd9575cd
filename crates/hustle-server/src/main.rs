use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{Method, header::{AUTHORIZATION, CONTENT_TYPE}};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use hustle_api::{AppState, AppStateInner};
use hustle_cms::CmsClient;
use hustle_server::config::Config;
use hustle_server::init_tracing;
use hustle_verify::{Mailer, SmtpMailer, WebDriverFetcher};

/// Placeholder auth secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
    "your-secret-here",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    init_tracing("hustleworthy=debug,hustle_api=debug,tower_http=debug");

    let config = Config::load()?;
    if config.auth_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&config.auth_secret.as_str()) {
        eprintln!("FATAL: HUSTLE_AUTH_SECRET is unset or still a placeholder.");
        eprintln!("       Set it in your .env file and restart.");
        std::process::exit(1);
    }

    let db = hustle_db::Database::open(&config.db_path)?;

    let mailer: Option<Arc<dyn Mailer>> = match &config.smtp {
        Some(smtp) => Some(Arc::new(SmtpMailer::new(smtp)?)),
        None => None,
    };

    let cms = match &config.cms_service {
        Some(service) => Some(CmsClient::new(service, &config.cms_api_key, config.fetch_timeout)?),
        None => {
            warn!("HUSTLE_CMS_SERVICE not set, blog routes are disabled");
            None
        }
    };

    if config.revalidate_secret.is_none() {
        warn!("HUSTLE_REVALIDATE_SECRET not set, revalidation requests will be refused");
    }

    let state: AppState = Arc::new(AppStateInner {
        db,
        cms,
        fetcher: Arc::new(WebDriverFetcher::new(config.webdriver_url.clone(), config.fetch_timeout)),
        mailer,
        config: config.api(),
    });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(false);

    let app = hustle_api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Hustleworthy listening on {}", addr);
    info!("Public base URL {}", config.base_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    warn!("SIGTERM handler unavailable ({}), Ctrl+C only", e);
                    ctrl_c.await.ok();
                    info!("Received Ctrl+C, shutting down...");
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
