use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewUser, Post, User};
use crate::error::RepoError;

/// Post repository - durable storage for posts plus the visibility-filtered
/// listing the workflow engine relies on.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a fully-built post.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Find a post by its id.
    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Persist changes to an existing post, refreshing `updated_at`.
    async fn save(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post by its id.
    async fn remove(&self, id: Uuid) -> Result<(), RepoError>;

    /// One page of the posts visible to `caller_id` (public posts plus the
    /// caller's own), with the count of all visible posts regardless of the
    /// requested window. `page` is 1-based; both bounds reach the store
    /// unclamped.
    async fn list_visible(
        &self,
        caller_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Post>, u64), RepoError>;
}

/// User repository backing the identity service.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; the store assigns the id.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;

    /// Find a user by their unique login.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Persist changes to an existing user, refreshing `updated_at`.
    async fn update(&self, user: User) -> Result<User, RepoError>;
}
