//! Core Module
//!
//! Configuration, shared state and server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, MailConfig};
pub use server::Server;
pub use state::ServerState;
