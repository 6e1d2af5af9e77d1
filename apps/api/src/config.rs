use anyhow::{bail, Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Which delivery mode candidate notifications go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Email,
    InApp,
}

impl ChannelKind {
    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "email" => Ok(ChannelKind::Email),
            "in_app" => Ok(ChannelKind::InApp),
            other => bail!("NOTIFICATION_CHANNEL must be 'email' or 'in_app', got '{other}'"),
        }
    }
}

/// SendGrid credentials, only present when the email channel is active.
#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: String,
    pub from_email: String,
    /// Mail send endpoint; overridable for sandboxes.
    pub api_url: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base URL uploaded objects are publicly reachable under.
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub notification_channel: ChannelKind,
    pub sendgrid: Option<SendGridConfig>,
    pub default_company_name: String,
    pub default_hr_name: String,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let notification_channel = ChannelKind::parse(
            &std::env::var("NOTIFICATION_CHANNEL").unwrap_or_else(|_| "in_app".to_string()),
        )?;
        let sendgrid = match notification_channel {
            ChannelKind::Email => Some(SendGridConfig {
                api_key: require_env("SENDGRID_API_KEY")?,
                from_email: require_env("SENDGRID_FROM_EMAIL")?,
                api_url: std::env::var("SENDGRID_API_URL")
                    .unwrap_or_else(|_| DEFAULT_SENDGRID_API_URL.to_string()),
            }),
            ChannelKind::InApp => None,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            s3_public_url: require_env("S3_PUBLIC_URL")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            notification_channel,
            sendgrid,
            default_company_name: std::env::var("DEFAULT_COMPANY_NAME")
                .unwrap_or_else(|_| "Our Company".to_string()),
            default_hr_name: std::env::var("DEFAULT_HR_NAME")
                .unwrap_or_else(|_| "HR Team".to_string()),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
