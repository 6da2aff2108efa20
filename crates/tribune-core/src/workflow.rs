//! The post workflow engine: token validation, authorization policy, and
//! store access composed into one request pipeline.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Identity, Page, Post, PostDraft, PostPatch};
use crate::error::{DomainError, RepoError};
use crate::policy::{self, Action};
use crate::ports::{IdentityVerifier, PostRepository};

/// Orchestrates one post operation per call: validate the credential,
/// authorize against the target, hit the store, map the outcome. Every
/// failure is terminal for the request; nothing is retried.
///
/// One instance is built at startup and shared across concurrent requests.
pub struct PostWorkflow {
    verifier: Arc<dyn IdentityVerifier>,
    posts: Arc<dyn PostRepository>,
}

impl PostWorkflow {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, posts: Arc<dyn PostRepository>) -> Self {
        Self { verifier, posts }
    }

    /// Create a post owned by the verified caller.
    pub async fn create_post(
        &self,
        credential: &str,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let identity = self.authenticate(credential).await?;
        if draft.title.is_empty() {
            return Err(DomainError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        policy::authorize(&identity, Action::Create, None)?;

        // The owner comes from the verified identity, never from the payload.
        let post = Post::new(identity.id, draft);
        self.posts.insert(post).await.map_err(store_error)
    }

    /// Fetch a single post, subject to the visibility rule.
    pub async fn get_post(&self, credential: &str, id: &str) -> Result<Post, DomainError> {
        let identity = self.authenticate(credential).await?;
        let target = self.fetch_target(id).await?;
        policy::authorize(&identity, Action::Read, target.as_ref())?;
        target.ok_or(DomainError::NotFound)
    }

    /// List the posts visible to the caller. `page` is 1-based; both bounds
    /// are handed to the store unclamped.
    pub async fn list_posts(
        &self,
        credential: &str,
        page: i64,
        size: i64,
    ) -> Result<Page, DomainError> {
        let identity = self.authenticate(credential).await?;
        policy::authorize(&identity, Action::List, None)?;
        let (posts, total) = self
            .posts
            .list_visible(identity.id, page, size)
            .await
            .map_err(store_error)?;
        Ok(Page { posts, total })
    }

    /// Merge a partial update into a post owned by the caller.
    pub async fn update_post(
        &self,
        credential: &str,
        id: &str,
        patch: PostPatch,
    ) -> Result<Post, DomainError> {
        let identity = self.authenticate(credential).await?;
        let target = self.fetch_target(id).await?;
        policy::authorize(&identity, Action::Update, target.as_ref())?;
        let mut post = target.ok_or(DomainError::NotFound)?;

        if matches!(patch.title.as_deref(), Some("")) {
            return Err(DomainError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        patch.apply(&mut post);

        self.posts.save(post).await.map_err(store_error)
    }

    /// Delete a post owned by the caller, responding with the pre-deletion
    /// snapshot.
    pub async fn delete_post(&self, credential: &str, id: &str) -> Result<Post, DomainError> {
        let identity = self.authenticate(credential).await?;
        let target = self.fetch_target(id).await?;
        policy::authorize(&identity, Action::Delete, target.as_ref())?;
        let snapshot = target.ok_or(DomainError::NotFound)?;

        self.posts.remove(snapshot.id).await.map_err(store_error)?;
        Ok(snapshot)
    }

    /// Exchange the credential for an identity. Every verification failure
    /// collapses into `Unauthorized`; an empty credential fails without
    /// contacting the verifier.
    async fn authenticate(&self, credential: &str) -> Result<Identity, DomainError> {
        if credential.is_empty() {
            return Err(DomainError::Unauthorized);
        }
        self.verifier
            .verify(credential)
            .await
            .map_err(|_| DomainError::Unauthorized)
    }

    /// Resolve an opaque id to a stored post. An id that is not a well-formed
    /// UUID denotes no post and resolves through the same missing-target path.
    async fn fetch_target(&self, id: &str) -> Result<Option<Post>, DomainError> {
        match Uuid::parse_str(id) {
            Ok(id) => self.posts.fetch_by_id(id).await.map_err(store_error),
            Err(_) => Ok(None),
        }
    }
}

fn store_error(err: RepoError) -> DomainError {
    DomainError::Repository(err.to_string())
}
