//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use tribune_core::domain::Post;
use tribune_core::error::RepoError;
use tribune_core::ports::PostRepository;
use tribune_core::workflow::PostWorkflow;
use tribune_infra::database;
use tribune_infra::{HttpIdentityVerifier, PostgresPostRepository, VerifierConfig};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<PostWorkflow>,
    /// Pooled client for the proxy fallback route.
    pub http: reqwest::Client,
    pub identity_url: String,
}

/// Post store used when no database is configured. Reads come back empty and
/// writes are dropped, with a warning per call.
struct UnconfiguredPostRepository;

#[async_trait::async_trait]
impl PostRepository for UnconfiguredPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        tracing::warn!("Database not configured - dropping inserted post");
        Ok(post)
    }

    async fn fetch_by_id(&self, _id: uuid::Uuid) -> Result<Option<Post>, RepoError> {
        tracing::warn!("Database not configured - post lookup returns nothing");
        Ok(None)
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        Ok(post)
    }

    async fn remove(&self, _id: uuid::Uuid) -> Result<(), RepoError> {
        Ok(())
    }

    async fn list_visible(
        &self,
        _caller_id: i64,
        _page: i64,
        _size: i64,
    ) -> Result<(Vec<Post>, u64), RepoError> {
        Ok((Vec::new(), 0))
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let posts: Arc<dyn PostRepository> = match &config.database {
            Some(db_config) => match database::connect(db_config).await {
                Ok(db) => Arc::new(PostgresPostRepository::new(db)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(UnconfiguredPostRepository)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without a post store.");
                Arc::new(UnconfiguredPostRepository)
            }
        };

        let verifier = Arc::new(HttpIdentityVerifier::new(VerifierConfig {
            base_url: config.identity_url.clone(),
            timeout: config.upstream_timeout,
        }));

        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("Failed to create HTTP client");

        tracing::info!("Application state initialized");

        Self {
            workflow: Arc::new(PostWorkflow::new(verifier, posts)),
            http,
            identity_url: config.identity_url.trim_end_matches('/').to_string(),
        }
    }
}
