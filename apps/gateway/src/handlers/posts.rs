//! Post management handlers.

use actix_web::{HttpResponse, web};

use tribune_core::domain::{Page, Post, PostDraft, PostPatch};
use tribune_shared::dto::{
    CreatePostRequest, ListPostsQuery, PostListResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::BearerToken;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    token: BearerToken,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        description: req.description,
        is_private: req.is_private,
        tags: req.tags,
    };

    let post = state.workflow.create_post(&token.0, draft).await?;
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    token: BearerToken,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.workflow.get_post(&token.0, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// GET /posts
pub async fn list_posts(
    state: web::Data<AppState>,
    token: BearerToken,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .workflow
        .list_posts(&token.0, query.page, query.size)
        .await?;
    Ok(HttpResponse::Ok().json(to_page_response(page)))
}

/// PUT /posts/{id}
///
/// Exposed as a full replace, applied as a merge: omitted fields keep their
/// stored value.
pub async fn update_post(
    state: web::Data<AppState>,
    token: BearerToken,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = PostPatch {
        title: req.title,
        description: req.description,
        is_private: req.is_private,
        tags: req.tags,
    };

    let post = state
        .workflow
        .update_post(&token.0, &path.into_inner(), patch)
        .await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /posts/{id} - responds with the post as it was before deletion.
pub async fn delete_post(
    state: web::Data<AppState>,
    token: BearerToken,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .workflow
        .delete_post(&token.0, &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        description: post.description,
        creator_id: post.creator_id,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
        is_private: post.is_private,
        tags: post.tags,
    }
}

fn to_page_response(page: Page) -> PostListResponse {
    PostListResponse {
        total: page.total,
        posts: page.posts.into_iter().map(to_response).collect(),
    }
}
