//! Authentication Module
//!
//! JWT token service and the request extractor that backs protected routes.

mod extractor;
mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
