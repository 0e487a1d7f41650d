//! Catalog Server - product catalog and lead capture backend
//!
//! # Architecture overview
//!
//! - **Database** (`db`): embedded SQLite via sqlx, versioned migrations
//! - **Authentication** (`auth`): JWT + Argon2
//! - **HTTP API** (`api`): RESTful endpoints
//! - **Mail** (`mail`): admin notification emails
//!
//! # Module structure
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT service and extractor
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models, repositories, migrations
//! ├── mail/          # notification mail client and templates
//! └── utils/         # errors, ids, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod mail;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging; call before anything else in main
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#
    );
}
