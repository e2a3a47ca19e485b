use std::path::PathBuf;

use anyhow::Result;
use autopost_core::{
    append_outputs, load_content, PublishRequest, PublishResult, PublisherConfig,
    TistoryPublisher, Visibility, DEFAULT_TAGS,
};
use clap::Parser;
use tracing::warn;

/// Publish a prepared post to a Tistory blog
#[derive(Debug, Parser)]
#[command(name = "post-to-blog", version, about = "Publish a prepared post to a Tistory blog")]
pub struct PublishArgs {
    /// Post title
    #[arg(long)]
    pub title: String,

    /// Path to the post body file
    #[arg(long)]
    pub content: PathBuf,

    /// Visibility: 0=private, 1=protected, 3=public
    #[arg(long, default_value = "3", value_parser = parse_visibility)]
    pub visibility: Visibility,

    /// Comma-separated tag list
    #[arg(long, default_value = DEFAULT_TAGS)]
    pub tags: String,
}

fn parse_visibility(raw: &str) -> Result<Visibility, String> {
    let level: u8 = raw
        .parse()
        .map_err(|_| format!("expected 0, 1 or 3, got '{}'", raw))?;
    Visibility::try_from(level).map_err(|e| e.to_string())
}

/// Read credentials, load the content file, publish, and record step outputs.
///
/// Configuration is checked before anything touches the disk or network.
pub async fn run_publish<F>(args: PublishArgs, lookup: F) -> Result<PublishResult>
where
    F: Fn(&str) -> Option<String>,
{
    let config = PublisherConfig::from_lookup(lookup)?;
    let content = load_content(&args.content)?;

    println!("Publishing to Tistory...");
    println!("   - Blog: {}", config.blog_name);
    println!("   - Title: {}", args.title);
    println!("   - Visibility: {}", args.visibility.label());

    let publisher = TistoryPublisher::with_base_url(&config.api_base, config.http_timeout)?;
    let request = PublishRequest {
        access_token: config.access_token.clone(),
        blog_name: config.blog_name.clone(),
        title: args.title,
        content,
        visibility: args.visibility,
        category: config.category.clone(),
        tags: args.tags,
    };

    let result = publisher.publish(&request).await?;

    println!("Published!");
    println!("   - Post ID: {}", result.post_id);
    println!("   - URL: {}", result.post_url);

    // The post is live at this point; a broken output file does not undo that.
    if let Some(path) = &config.output_path {
        if let Err(e) = append_outputs(path, &result) {
            warn!("{}", e);
            eprintln!("Warning: {}", e);
        }
    }

    Ok(result)
}
