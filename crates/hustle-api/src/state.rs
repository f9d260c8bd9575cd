use std::sync::Arc;

use tracing::{error, info, warn};

use hustle_cms::CmsClient;
use hustle_db::Database;
use hustle_verify::{Mailer, OutgoingEmail, PageFetcher};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub auth_secret: String,
    /// Public origin used in admin links and the sitemap.
    pub base_url: String,
    pub admin_email: Option<String>,
    pub revalidate_secret: Option<String>,
    pub expert_name: String,
}

/// Handles shared by every request, built once at startup.
pub struct AppStateInner {
    pub db: Database,
    pub cms: Option<CmsClient>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub config: ApiConfig,
}

impl AppStateInner {
    /// Run a datastore call on the blocking pool.
    pub async fn blocking<F, T>(self: &Arc<Self>, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(self);
        tokio::task::spawn_blocking(move || f(&state.db))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                anyhow::anyhow!("blocking task failed: {e}")
            })?
            .map_err(ApiError::from)
    }

    pub fn cms(&self) -> Result<&CmsClient, ApiError> {
        self.cms
            .as_ref()
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("blog CMS is not configured")))
    }

    /// Best-effort delivery. Failures are logged and reported as `false`.
    pub async fn notify(&self, email: OutgoingEmail) -> bool {
        let Some(mailer) = &self.mailer else {
            warn!("Mail is not configured, dropping '{}' to {}", email.subject, email.to);
            return false;
        };

        let to = email.to.clone();
        match mailer.send(email).await {
            Ok(()) => {
                info!("Email sent to {}", to);
                true
            }
            Err(e) => {
                warn!("Failed to send email to {}: {}", to, e);
                false
            }
        }
    }
}
