use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Notification mail configuration
///
/// | Env var | Default | Notes |
/// |---------|---------|-------|
/// | SMTP_HOST | smtp.gmail.com | relay host |
/// | EMAIL_USER | - | SMTP username; console backend when unset |
/// | EMAIL_PASS | - | SMTP password / app password |
/// | MAIL_FROM | EMAIL_USER | sender address |
/// | ADMIN_EMAIL | admin@localhost | business address receiving notifications |
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from_address: String,
    pub admin_address: String,
}

impl MailConfig {
    pub fn from_env() -> Self {
        let smtp_username = std::env::var("EMAIL_USER").ok();
        let from_address = std::env::var("MAIL_FROM")
            .ok()
            .or_else(|| smtp_username.clone())
            .unwrap_or_else(|| "noreply@localhost".into());
        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
            smtp_username,
            smtp_password: std::env::var("EMAIL_PASS").ok(),
            from_address,
            admin_address: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@localhost".into()),
        }
    }
}

/// Server configuration
///
/// All settings can be overridden through environment variables:
///
/// | Env var | Default | Notes |
/// |---------|---------|-------|
/// | WORK_DIR | ./data | database, uploads and logs live here |
/// | HTTP_PORT | 5000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ADMIN_PASSWORD | admin123 | seed admin password, change in production |
///
/// JWT settings are documented on [`JwtConfig`], mail settings on
/// [`MailConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Notification mail settings
    pub mail: MailConfig,
    /// Password for the one-time seed admin bootstrap
    pub admin_password: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            mail: MailConfig::from_env(),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),
        }
    }

    /// Override work dir and port, used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// Create the work directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
