use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::user;
use crate::mail::Mailer;

/// Server state - shared handles for all services
///
/// Constructed once at startup and cloned into every handler; all
/// expensive members are behind `Arc` or are pools, so clones are cheap.
/// Services receive their dependencies through this struct rather than
/// touching process globals.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT authentication service
    pub jwt_service: Arc<JwtService>,
    /// Notification mail client
    pub mailer: Arc<Mailer>,
}

impl ServerState {
    /// Manual construction, used by tests that wire a memory mailer
    pub fn new(
        config: Config,
        pool: SqlitePool,
        jwt_service: Arc<JwtService>,
        mailer: Arc<Mailer>,
    ) -> Self {
        Self {
            config,
            pool,
            jwt_service,
            mailer,
        }
    }

    /// Initialize server state
    ///
    /// 1. Work directory structure
    /// 2. Database (work_dir/database/catalog.db) with migrations
    /// 3. Seed admin bootstrap
    /// 4. JWT service, mail client
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be initialized - the server cannot
    /// run without it.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("catalog.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let pool = db_service.pool;

        user::ensure_seed_admin(&pool, &config.mail.admin_address, &config.admin_password)
            .await
            .expect("Failed to bootstrap seed admin account");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let mailer =
            Arc::new(Mailer::from_config(&config.mail).expect("Failed to initialize mail client"));

        Self::new(config.clone(), pool, jwt_service, mailer)
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Working directory
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// Directory holding uploaded product images
    pub fn uploads_dir(&self) -> PathBuf {
        self.config.uploads_dir()
    }
}
