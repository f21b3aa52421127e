//! Oxcart Market API - public order service.
//!
//! This binary serves the JSON API: anonymous carts, checkout, and order
//! retrieval.
//!
//! # Architecture
//!
//! - Axum web framework over the in-process store
//! - Identity supplied by the upstream gateway as trusted headers
//! - Order confirmations delivered by a background worker fed from an
//!   in-process queue; checkout never waits on delivery

#![cfg_attr(not(test), forbid(unsafe_code))]

use oxcart_api::config::ApiConfig;
use oxcart_api::routes;
use oxcart_api::state::AppState;
use oxcart_store::Store;
use oxcart_store::events::{self, LogMailer};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return a guard that must be kept
/// alive for the server's lifetime.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before the tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "oxcart_api=info,oxcart_store=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let store = Store::new();

    // Notification pipeline: checkout publishes, this worker delivers
    let (sink, queue) = events::queue();
    tokio::spawn(events::run_worker(queue, LogMailer));

    let state = AppState::new(store, sink);
    let app = routes::router(state);

    let addr = config.socket_addr();
    tracing::info!(%addr, "Oxcart API listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
