use clap::Args;
use serde::Serialize;

use folio::core::data::{BlogPost, Comment};
use folio::core::services::{BlogQuery, SharedApi};
use folio::error::Result;

use super::{fetching, print_json, truncate};

#[derive(Args)]
pub struct BlogArgs {
    /// Filter by category
    #[arg(long)]
    category: Option<String>,

    /// Filter by tag
    #[arg(long)]
    tag: Option<String>,

    /// Case-insensitive search in title, excerpt and tags
    #[arg(short, long)]
    search: Option<String>,

    /// Page number, starting at 1
    #[arg(short, long)]
    page: Option<u32>,

    /// Posts per page
    #[arg(short, long)]
    limit: Option<u32>,
}

#[derive(Args)]
pub struct PostArgs {
    /// Post id or slug
    id_or_slug: String,

    /// Also list the post's comments
    #[arg(long)]
    comments: bool,
}

#[derive(Serialize)]
struct PostWithComments {
    #[serde(flatten)]
    post: BlogPost,
    comments: Vec<Comment>,
}

pub async fn list(args: BlogArgs, api: &SharedApi, json: bool) -> Result<()> {
    let query = BlogQuery {
        category: args.category,
        tag: args.tag,
        search: args.search,
        page: args.page,
        limit: args.limit,
    };
    let page = fetching("Loading blog posts...", json, api.blog_posts(&query)).await?;
    if json {
        return print_json(&page);
    }

    println!("📰 {} matching posts (page {}):", page.count, query.page());
    if page.results.is_empty() {
        println!("  (no posts on this page)");
    }
    for post in &page.results {
        print_post_line(post);
    }
    match (page.previous, page.next) {
        (None, None) => {}
        (previous, next) => {
            let fmt = |p: Option<u32>| p.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
            println!("\n⬅️  previous: {}   next: {} ➡️", fmt(previous), fmt(next));
        }
    }
    Ok(())
}

pub async fn show(args: PostArgs, api: &SharedApi, json: bool) -> Result<()> {
    let post = fetching("Loading post...", json, api.blog_post(&args.id_or_slug)).await?;
    let comments = if args.comments {
        fetching("Loading comments...", json, api.blog_comments(post.id)).await?
    } else {
        Vec::new()
    };

    if json {
        return if args.comments {
            print_json(&PostWithComments { post, comments })
        } else {
            print_json(&post)
        };
    }

    println!("📝 {}", post.title);
    println!("  🗂️  {} | 👁️  {} views", post.category, post.views);
    if let Some(date) = &post.publish_date {
        println!("  📅 {}", date);
    }
    if !post.tags.is_empty() {
        println!("  🏷️  {}", post.tags.join(", "));
    }
    println!("\n{}", post.content.as_deref().unwrap_or(&post.excerpt));

    if args.comments {
        println!("\n💬 {} comments:", comments.len());
        for comment in &comments {
            println!("  {}: {}", comment.author, truncate(&comment.content, 100));
        }
    }
    Ok(())
}

pub async fn stats(api: &SharedApi, json: bool) -> Result<()> {
    let overview = fetching("Loading blog statistics...", json, api.blog_overview()).await?;
    if json {
        return print_json(&overview);
    }

    println!("📊 Blog statistics:");
    println!("  📰 Posts: {}", overview.total_posts);
    println!("  👁️  Total views: {}", overview.total_views);
    println!("  🗂️  Categories: {}", overview.categories.join(", "));

    if !overview.featured_posts.is_empty() {
        println!("\n⭐ Featured:");
        for post in &overview.featured_posts {
            print_post_line(post);
        }
    }
    println!("\n🕒 Recent:");
    for post in &overview.recent_posts {
        print_post_line(post);
    }
    Ok(())
}

fn print_post_line(post: &BlogPost) {
    let date = post.publish_date.as_deref().unwrap_or("undated");
    println!("  [{}] {} ({}, {})", post.id, post.title, post.category, date);
    if !post.excerpt.is_empty() {
        println!("       {}", truncate(&post.excerpt, 90));
    }
}
