//! Sample data generation for development databases and test fixtures.

use rand::Rng;
use rand::seq::SliceRandom;

use blog_core::domain::{Author, NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Linus", "Barbara", "Ken", "Margaret", "Dennis", "Frances", "Edsger",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Torvalds", "Liskov", "Thompson", "Hamilton", "Ritchie",
    "Allen", "Dijkstra",
];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
];

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

fn words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<&'static str> {
    (0..count).map(|_| pick(rng, WORDS)).collect()
}

/// Generate a random post draft.
pub fn sample_post<R: Rng + ?Sized>(rng: &mut R) -> NewPost {
    let title_len = rng.gen_range(2..6);
    let title = words(rng, title_len).join(" ");

    let sentence_count = rng.gen_range(1..5);
    let content = (0..sentence_count)
        .map(|_| {
            let len = rng.gen_range(4..12);
            format!("{}.", words(rng, len).join(" "))
        })
        .collect::<Vec<_>>()
        .join(" ");

    let author = Author::new(pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES));

    NewPost::new(title, content, author)
}

/// Insert `count` random posts and return them as stored.
pub async fn seed_posts(repo: &dyn PostRepository, count: usize) -> Result<Vec<Post>, RepoError> {
    let drafts: Vec<NewPost> = {
        let mut rng = rand::thread_rng();
        (0..count).map(|_| sample_post(&mut rng)).collect()
    };

    let mut created = Vec::with_capacity(count);
    for draft in drafts {
        created.push(repo.insert(draft).await?);
    }

    tracing::info!(count = created.len(), "Seeded posts");
    Ok(created)
}
