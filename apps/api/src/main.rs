mod applications;
mod config;
mod db;
mod errors;
mod models;
mod notify;
mod posts;
mod routes;
mod state;
mod store;
mod uploads;

#[cfg(test)]
mod testing;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::applications::transition::NotificationDefaults;
use crate::config::{ChannelKind, Config};
use crate::db::create_pool;
use crate::notify::email::EmailChannel;
use crate::notify::in_app::InAppChannel;
use crate::notify::NotificationChannel;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::{PgApplicationStore, PgNotificationStore, PgPostStore};
use crate::store::NotificationStore;
use crate::uploads::S3ObjectStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talent API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let notifications: Arc<dyn NotificationStore> =
        Arc::new(PgNotificationStore::new(db.clone()));

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    let channel = build_channel(&config, notifications.clone())?;
    info!("Notification channel: {}", channel.name());

    let state = AppState {
        posts: Arc::new(PgPostStore::new(db.clone())),
        applications: Arc::new(PgApplicationStore::new(db)),
        notifications,
        channel,
        objects: Arc::new(S3ObjectStore::new(
            s3,
            config.s3_bucket.clone(),
            config.s3_public_url.clone(),
        )),
        defaults: NotificationDefaults {
            company_name: config.default_company_name.clone(),
            hr_name: config.default_hr_name.clone(),
        },
        max_upload_bytes: config.max_upload_bytes,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_channel(
    config: &Config,
    notifications: Arc<dyn NotificationStore>,
) -> Result<Arc<dyn NotificationChannel>> {
    let channel: Arc<dyn NotificationChannel> =
        match (config.notification_channel, &config.sendgrid) {
            (ChannelKind::Email, Some(sendgrid)) => Arc::new(EmailChannel::new(sendgrid)?),
            (ChannelKind::Email, None) => {
                anyhow::bail!("NOTIFICATION_CHANNEL=email requires SendGrid credentials")
            }
            (ChannelKind::InApp, _) => Arc::new(InAppChannel::new(notifications)),
        };
    Ok(channel)
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "talent-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
