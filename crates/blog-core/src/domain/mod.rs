//! Domain entities - the core business objects.

mod post;

pub use post::{Author, AuthorChanges, NewPost, Post, PostChanges};
