//! Post resource handlers.
//!
//! Update and delete answer `201 Created` on success. Existing clients
//! depend on that status, so it is kept even though 200/204 would be the
//! usual choice.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{Author, AuthorChanges, NewPost, Post, PostChanges};
use blog_core::error::{DomainError, RepoError};
use blog_shared::ApiResponse;
use blog_shared::dto::{
    AuthorPayload, AuthorResponse, CreatePostRequest, DeletedPost, PostResponse, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Public projection of a stored post.
pub fn to_public(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        content: post.content.clone(),
        author: AuthorResponse {
            first_name: post.author.first_name.clone(),
            last_name: post.author.last_name.clone(),
        },
        created_at: post.created_at.to_rfc3339(),
    }
}

/// Path ids that are not UUIDs cannot name a stored post.
fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("Post with id {} not found", raw)))
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

fn post_not_found(id: Uuid) -> impl FnOnce(RepoError) -> AppError {
    move |err| match err {
        RepoError::NotFound => not_found(id).into(),
        other => other.into(),
    }
}

/// Required fields are checked in order; the first absent one is reported.
fn new_post_from(req: CreatePostRequest) -> Result<NewPost, DomainError> {
    let title = req.title.ok_or_else(|| DomainError::missing_field("title"))?;
    let content = req
        .content
        .ok_or_else(|| DomainError::missing_field("content"))?;
    let AuthorPayload {
        first_name,
        last_name,
    } = req.author.ok_or_else(|| DomainError::missing_field("author"))?;
    let first_name = first_name.ok_or_else(|| DomainError::missing_field("author.firstName"))?;
    let last_name = last_name.ok_or_else(|| DomainError::missing_field("author.lastName"))?;

    Ok(NewPost::new(title, content, Author::new(first_name, last_name)))
}

fn changes_from(req: UpdatePostRequest) -> PostChanges {
    PostChanges {
        title: req.title,
        content: req.content,
        author: req.author.map(|a| AuthorChanges {
            first_name: a.first_name,
            last_name: a.last_name,
        }),
    }
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    tracing::debug!(count = posts.len(), "Listing posts");

    let body: Vec<PostResponse> = posts.iter().map(to_public).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(to_public(&post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = new_post_from(body.into_inner())?;

    let post = state.posts.insert(new_post).await?;
    tracing::info!(
        post_id = %post.id,
        author = %post.author.full_name(),
        "Post created"
    );

    Ok(HttpResponse::Created().json(to_public(&post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    let req = body.into_inner();

    if let Some(raw_body_id) = req.id.as_deref() {
        let body_id = Uuid::parse_str(raw_body_id).map_err(|_| {
            AppError::BadRequest(format!("Request body id ({}) is not a valid id", raw_body_id))
        })?;
        if body_id != id {
            return Err(AppError::BadRequest(format!(
                "Request path id ({}) and request body id ({}) must match",
                id, body_id
            )));
        }
    }

    let changes = changes_from(req);
    if changes.is_empty() {
        tracing::debug!(post_id = %id, "Update request carries no field changes");
    }

    let post = state
        .posts
        .update(id, changes)
        .await
        .map_err(post_not_found(id))?;
    tracing::info!(post_id = %post.id, "Post updated");

    Ok(HttpResponse::Created().json(to_public(&post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_post_id(&path)?;

    state.posts.delete(id).await.map_err(post_not_found(id))?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        DeletedPost { id: id.to_string() },
        "Post deleted",
    )))
}
