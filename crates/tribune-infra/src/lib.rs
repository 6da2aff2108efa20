//! # Tribune Infrastructure
//!
//! Concrete implementations of the ports defined in `tribune-core`:
//! PostgreSQL repositories over SeaORM, the JWT and Argon2 services used by
//! the identity server, and the HTTP client the gateway uses to verify
//! bearer credentials against the identity service.

pub mod auth;
pub mod database;
pub mod identity;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, PostgresPostRepository, PostgresUserRepository};
pub use identity::{HttpIdentityVerifier, VerifierConfig};
