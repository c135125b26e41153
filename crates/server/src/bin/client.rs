use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_BLOG_ID: &str = "demo-post";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url = std::env::var("COMMENT_GATE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let mut args = std::env::args().skip(1);
    let blog_id = args.next().unwrap_or_else(|| DEFAULT_BLOG_ID.to_string());
    let email = args.next().unwrap_or_else(|| "ferris@example.com".to_string());
    let client_ref = format!("cli-{}", chrono::Utc::now().timestamp_millis());

    let client = reqwest::Client::new();
    println!("Starting comment-gate test client...");

    println!("\n[1/3] Submitting comment on blog {}...", blog_id);
    let resp = client
        .post(format!("{}/api/comments", base_url))
        .json(&json!({
            "blog": blog_id,
            "name": "Ferris",
            "email": email,
            "content": "This is a message from the comment-gate test client!",
            "clientRef": client_ref,
        }))
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        println!("   -> Blog {} is unknown to the server.", blog_id);
        println!("      Start it with COMMENT_GATE_DATABASE__SEED_FILE=seed/blogs.json or PUT /api/blogs/{}.", blog_id);
        return Ok(());
    }
    if !resp.status().is_success() {
        println!("   -> Failed to submit: {}", resp.text().await?);
        return Ok(());
    }
    let body: Value = resp.json().await?;
    let comment_id = body["commentId"].as_str().unwrap_or_default().to_string();
    println!("   -> Accepted, comment id {}", comment_id);

    println!("\n[2/3] Enter the 4-digit code sent to {} (check the server log in log mode):", email);
    print!("   code> ");
    io::stdout().flush()?;
    let mut code = String::new();
    io::stdin().lock().read_line(&mut code)?;

    let resp = client
        .post(format!("{}/api/comments/verify", base_url))
        .json(&json!({ "commentId": comment_id, "code": code.trim(), "email": email }))
        .send()
        .await?;
    let status = resp.status();
    let body: Value = resp.json().await?;
    if !status.is_success() {
        println!("   -> Verification failed: {}", body["message"]);
        return Ok(());
    }
    println!("   -> {}", body["message"]);

    println!("\n[3/3] Fetching comments visible to this browser...");
    let comments: Vec<Value> = client
        .get(format!("{}/api/comments/blog/{}", base_url, blog_id))
        .query(&[("email", email.as_str()), ("clientRef", client_ref.as_str())])
        .send()
        .await?
        .json()
        .await?;

    println!("   -> Retrieved {} comment(s):", comments.len());
    for c in comments {
        let marker = if c["pending"].as_bool().unwrap_or(false) {
            " (pending approval)"
        } else {
            ""
        };
        println!("      - [{}] {}: {}{}", c["createdAt"], c["name"], c["content"], marker);
    }

    Ok(())
}
