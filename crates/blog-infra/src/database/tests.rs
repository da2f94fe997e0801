use blog_core::domain::{Author, AuthorChanges, NewPost, Post, PostChanges};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn model(id: uuid::Uuid, title: &str, content: &str) -> post::Model {
    post::Model {
        id,
        title: title.to_owned(),
        content: content.to_owned(),
        author_first_name: "Jane".to_owned(),
        author_last_name: "Doe".to_owned(),
        created_at: chrono::Utc::now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = uuid::Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model(post_id, "Test Post", "Content")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author, Author::new("Jane", "Doe"));
}

#[tokio::test]
async fn test_find_all_maps_every_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            model(uuid::Uuid::new_v4(), "one", "a"),
            model(uuid::Uuid::new_v4(), "two", "b"),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts: Vec<Post> = repo.find_all().await.unwrap();

    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "two"]);
}

#[tokio::test]
async fn test_insert_returns_stored_post() {
    let post_id = uuid::Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model(post_id, "T", "C")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let created = repo
        .insert(NewPost::new("T", "C", Author::new("Jane", "Doe")))
        .await
        .unwrap();

    assert_eq!(created.id, post_id);
    assert_eq!(created.title, "T");
    assert_eq!(created.content, "C");
}

#[tokio::test]
async fn test_update_applies_changes() {
    let post_id = uuid::Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![
            vec![model(post_id, "Before", "Body")],
            vec![model(post_id, "After", "Body")],
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let updated = repo
        .update(
            post_id,
            PostChanges {
                title: Some("After".to_string()),
                author: Some(AuthorChanges::default()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "After");
    assert_eq!(updated.content, "Body");
}

#[tokio::test]
async fn test_update_unknown_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo
        .update(
            uuid::Uuid::new_v4(),
            PostChanges {
                title: Some("x".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, uuid::Uuid>::delete(&repo, uuid::Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_existing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, uuid::Uuid>::delete(&repo, uuid::Uuid::new_v4()).await;

    assert!(result.is_ok());
}
