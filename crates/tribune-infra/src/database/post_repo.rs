//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use tribune_core::domain::Post;
use tribune_core::error::RepoError;
use tribune_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// Post store over the shared PostgreSQL pool.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Public posts plus the caller's own.
    fn visible_to(caller_id: i64) -> Condition {
        Condition::any()
            .add(post::Column::IsPrivate.eq(false))
            .add(post::Column::CreatorId.eq(caller_id))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, entry: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(entry)
            .insert(&self.db)
            .await
            .map_err(query_error)?;

        Ok(model.into())
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, mut entry: Post) -> Result<Post, RepoError> {
        entry.updated_at = chrono::Utc::now();
        let model = post::ActiveModel::from(entry)
            .update(&self.db)
            .await
            .map_err(query_error)?;

        Ok(model.into())
    }

    async fn remove(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn list_visible(
        &self,
        caller_id: i64,
        page: i64,
        size: i64,
    ) -> Result<(Vec<Post>, u64), RepoError> {
        let total = PostEntity::find()
            .filter(Self::visible_to(caller_id))
            .count(&self.db)
            .await
            .map_err(query_error)?;

        // The workflow hands page/size through untouched; out-of-range
        // values collapse to an empty window here.
        let limit = u64::try_from(size).unwrap_or(0);
        let offset = u64::try_from(page.saturating_sub(1))
            .unwrap_or(0)
            .saturating_mul(limit);

        let rows = PostEntity::find()
            .filter(Self::visible_to(caller_id))
            .order_by_asc(post::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }
}

fn query_error(err: sea_orm::DbErr) -> RepoError {
    RepoError::Query(err.to_string())
}
