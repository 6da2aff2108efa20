//! Application state - shared across all handlers.

use std::sync::Arc;

use tribune_core::domain::{NewUser, User};
use tribune_core::error::RepoError;
use tribune_core::ports::{PasswordService, TokenService, UserRepository};
use tribune_infra::database;
use tribune_infra::{Argon2PasswordService, JwtTokenService, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

/// User store used when no database is configured. Reads come back empty and
/// writes are dropped, with a warning per call.
struct UnconfiguredUserRepository;

#[async_trait::async_trait]
impl UserRepository for UnconfiguredUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        tracing::warn!("Database not configured - dropping registered user");
        let now = chrono::Utc::now();
        Ok(User {
            id: 0,
            login: user.login,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            date_of_birth: user.date_of_birth,
            phone: user.phone,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, RepoError> {
        tracing::warn!("Database not configured - user lookup returns nothing");
        Ok(None)
    }

    async fn find_by_login(&self, _login: &str) -> Result<Option<User>, RepoError> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, RepoError> {
        Ok(None)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        Ok(user)
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let users: Arc<dyn UserRepository> = match &config.database {
            Some(db_config) => match database::connect(db_config).await {
                Ok(db) => Arc::new(PostgresUserRepository::new(db)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(UnconfiguredUserRepository)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without a user store.");
                Arc::new(UnconfiguredUserRepository)
            }
        };

        tracing::info!("Application state initialized");

        Self {
            users,
            tokens: Arc::new(JwtTokenService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }
}
