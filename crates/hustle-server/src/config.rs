use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use tracing::{info, warn};

use hustle_api::ApiConfig;
use hustle_verify::SmtpSettings;

const DEFAULT_EXPERT: &str = "Folasade Oluwagbenga";

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub auth_secret: String,
    pub base_url: String,
    pub admin_email: Option<String>,
    /// Present only when login, key and sender are all set.
    pub smtp: Option<SmtpSettings>,
    pub revalidate_secret: Option<String>,
    pub cms_service: Option<String>,
    pub cms_api_key: String,
    pub webdriver_url: String,
    pub fetch_timeout: Duration,
    pub expert_name: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let smtp_login = optional("HUSTLE_SMTP_LOGIN");
        let smtp_key = optional("HUSTLE_SMTP_KEY");
        let sender = optional("HUSTLE_MAIL_SENDER");
        let smtp = match (smtp_login, smtp_key, sender) {
            (Some(login), Some(key), Some(sender)) => Some(SmtpSettings {
                host: try_load("HUSTLE_SMTP_HOST", "smtp-relay.brevo.com")?,
                port: try_load("HUSTLE_SMTP_PORT", "587")?,
                login,
                key,
                sender,
            }),
            _ => {
                warn!("SMTP credentials incomplete, outgoing mail is disabled");
                None
            }
        };

        Ok(Self {
            host: try_load("HUSTLE_HOST", "0.0.0.0")?,
            port: try_load("HUSTLE_PORT", "3000")?,
            db_path: try_load("HUSTLE_DB_PATH", "hustleworthy.db")?,
            auth_secret: optional("HUSTLE_AUTH_SECRET").unwrap_or_default(),
            base_url: try_load("HUSTLE_BASE_URL", "http://localhost:3000")?,
            admin_email: optional("HUSTLE_ADMIN_EMAIL"),
            smtp,
            revalidate_secret: optional("HUSTLE_REVALIDATE_SECRET"),
            cms_service: optional("HUSTLE_CMS_SERVICE"),
            cms_api_key: optional("HUSTLE_CMS_API_KEY").unwrap_or_default(),
            webdriver_url: try_load("HUSTLE_WEBDRIVER_URL", "http://localhost:9515")?,
            fetch_timeout: Duration::from_secs(try_load("HUSTLE_FETCH_TIMEOUT_SECS", "30")?),
            expert_name: try_load("HUSTLE_EXPERT_NAME", DEFAULT_EXPERT)?,
        })
    }

    pub fn api(&self) -> ApiConfig {
        ApiConfig {
            auth_secret: self.auth_secret.clone(),
            base_url: self.base_url.clone(),
            admin_email: self.admin_email.clone(),
            revalidate_secret: self.revalidate_secret.clone(),
            expert_name: self.expert_name.clone(),
        }
    }
}

/// Set and non-blank, or `None`.
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let raw = optional(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value '{raw}'"))
}
