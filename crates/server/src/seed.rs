use anyhow::Context;
use domain::ports::ContentRepository;
use domain::{Blog, UpsertBlog};
use tracing::info;

/// Parses a JSON array of `{id, title, slug}` entries.
pub fn parse_blogs(raw: &str) -> anyhow::Result<Vec<Blog>> {
    let entries: Vec<Blog> =
        serde_json::from_str(raw).context("Seed file is not a JSON array of blogs")?;

    entries
        .into_iter()
        .map(|b| {
            let id = b.id.clone();
            UpsertBlog {
                id: b.id,
                title: b.title,
                slug: b.slug,
            }
            .validate()
            .map_err(|errors| anyhow::anyhow!("Invalid seed entry {:?}: {:?}", id, errors))
        })
        .collect()
}

pub async fn seed_blogs(repo: &dyn ContentRepository, path: &str) -> anyhow::Result<usize> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file: {}", path))?;

    let blogs = parse_blogs(&raw)?;
    for blog in &blogs {
        repo.save_blog(blog).await?;
    }

    info!("Seeded {} blogs from {}", blogs.len(), path);
    Ok(blogs.len())
}
