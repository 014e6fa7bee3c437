use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::mailer::BrevoMailer;
use crate::media::{CloudinaryUploader, ImageHost};

/// Everything a request handler can reach. Shared read-only by all workers.
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
    pub mailer: Option<BrevoMailer>,
    pub images: Option<Box<dyn ImageHost>>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let mailer = config.mail.as_ref().map(BrevoMailer::new);
        let images = config
            .cdn
            .as_ref()
            .map(|cdn| Box::new(CloudinaryUploader::new(cdn)) as Box<dyn ImageHost>);

        if mailer.is_none() {
            log::warn!("BREVO_API_KEY not set; welcome emails are disabled");
        }
        if images.is_none() {
            log::warn!("CDN_UPLOAD_URL/CDN_UPLOAD_PRESET not set; image uploads are disabled");
        }

        Self {
            db: Database::new(config.database_path.clone()),
            config,
            mailer,
            images,
        }
    }
}
