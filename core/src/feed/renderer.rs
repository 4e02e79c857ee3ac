//! Feed renderer
//!
//! Renders feeds and profiles to markdown.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::Feed;
use crate::domain::cursor::Cursor;
use crate::domain::entities::User;
use crate::error::DomainError;

/// One post as shown in a feed page
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    /// 1-based position in the feed
    pub index: usize,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub like_count: usize,
}

/// Take up to `limit` posts forward from the feed's current position.
pub fn collect_page(feed: &mut Feed<'_>, limit: usize) -> Result<Vec<FeedEntry>, DomainError> {
    let mut entries = Vec::new();
    while entries.len() < limit && feed.has_next() {
        let post = feed.next()?;
        let (text, created_at, like_count) =
            (post.text().to_string(), post.created_at(), post.like_count());

        let author = feed
            .last_user()
            .and_then(|id| feed.network().user(&id))
            .map(|u| u.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        entries.push(FeedEntry {
            index: feed.next_index(),
            author,
            text,
            created_at,
            like_count,
        });
    }
    Ok(entries)
}

/// Render the next page of `feed` (up to `limit` posts) to markdown.
pub fn render_page(feed: &mut Feed<'_>, limit: usize) -> Result<String, DomainError> {
    let owner = feed
        .owner()
        .map(|u| u.name().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let size = feed.size();
    let entries = collect_page(feed, limit)?;

    let mut buf = String::new();
    buf.push_str(&format!("# News Feed: {}\n\n", owner));

    if entries.is_empty() {
        if size == 0 {
            buf.push_str("_No posts yet._\n");
        } else {
            buf.push_str("_End of feed._\n");
        }
        return Ok(buf);
    }

    let first = entries[0].index;
    let last = entries[entries.len() - 1].index;
    buf.push_str(&format!("Posts {}-{} of {}\n\n", first, last, size));

    for entry in &entries {
        buf.push_str(&render_entry(entry));
        buf.push('\n');
    }

    if feed.has_next() {
        buf.push_str("---\n\n_More posts available._\n");
    }

    Ok(buf)
}

fn render_entry(entry: &FeedEntry) -> String {
    let likes = match entry.like_count {
        0 => String::new(),
        1 => " | 1 like".to_string(),
        n => format!(" | {} likes", n),
    };

    format!(
        "[{}] **{}** | {}{}\n    {}\n",
        entry.index,
        entry.author,
        entry.created_at.format("%Y-%m-%d %H:%M UTC"),
        likes,
        truncate(&entry.text, 280)
    )
}

/// Truncate a string with ellipsis, on a character boundary
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render a user profile
pub fn render_profile(user: &User) -> String {
    let mut buf = String::new();

    buf.push_str(&format!("# User: {}\n\n", user.name()));

    buf.push_str("## Stats\n\n");
    buf.push_str(&format!("- **Posts:** {}\n", user.post_count()));
    buf.push_str(&format!("- **Following:** {}\n", user.subscription_count()));

    buf.push_str("\n## Account\n\n");
    buf.push_str(&format!(
        "- **Registered:** {}\n",
        user.registered_at().format("%Y-%m-%d")
    ));
    if let Some(latest) = user.posts().first() {
        buf.push_str(&format!(
            "- **Last Post:** {}\n",
            latest.created_at().format("%Y-%m-%d %H:%M UTC")
        ));
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{publish_at, test_network};

    #[test]
    fn render_empty_feed() {
        let (mut network, _) = test_network();
        let ada = network.register("ada", "pw").unwrap();
        let mut feed = network.feed(&ada).unwrap();

        let out = render_page(&mut feed, 10).unwrap();
        assert!(out.starts_with("# News Feed: ada\n\n"));
        assert!(out.contains("_No posts yet._"));
    }

    #[test]
    fn render_page_lists_merged_posts() {
        let (mut network, clock) = test_network();
        let ada = network.register("ada", "pw").unwrap();
        let bob = network.register("bob", "pw").unwrap();
        publish_at(&mut network, &clock, &ada, "hello from ada", 1);
        publish_at(&mut network, &clock, &bob, "hello from bob", 2);
        network.follow(&ada, &bob).unwrap();
        network.like(&ada, &bob, 0).unwrap();

        let mut feed = network.feed(&ada).unwrap();
        let out = render_page(&mut feed, 10).unwrap();

        assert!(out.contains("Posts 1-2 of 2"));
        assert!(out.contains("[1] **bob** | 2024-01-01 00:02 UTC | 1 like\n    hello from bob"));
        assert!(out.contains("[2] **ada** | 2024-01-01 00:01 UTC\n    hello from ada"));
        assert!(out.find("bob").unwrap() < out.find("hello from ada").unwrap());
        assert!(!out.contains("More posts"));
    }

    #[test]
    fn render_page_respects_limit_and_continues() {
        let (mut network, clock) = test_network();
        let ada = network.register("ada", "pw").unwrap();
        for minute in 1..=3 {
            publish_at(&mut network, &clock, &ada, &format!("post {}", minute), minute);
        }

        let mut feed = network.feed(&ada).unwrap();
        let first = render_page(&mut feed, 2).unwrap();
        assert!(first.contains("Posts 1-2 of 3"));
        assert!(first.contains("_More posts available._"));

        let second = render_page(&mut feed, 2).unwrap();
        assert!(second.contains("Posts 3-3 of 3"));
        assert!(second.contains("post 1"));

        let third = render_page(&mut feed, 2).unwrap();
        assert!(third.contains("_End of feed._"));
    }

    #[test]
    fn collect_page_records_positions() {
        let (mut network, clock) = test_network();
        let ada = network.register("ada", "pw").unwrap();
        publish_at(&mut network, &clock, &ada, "a", 1);
        publish_at(&mut network, &clock, &ada, "b", 2);

        let mut feed = network.feed(&ada).unwrap();
        let entries = collect_page(&mut feed, 5).unwrap();
        let summary: Vec<_> = entries.iter().map(|e| (e.index, e.text.as_str())).collect();
        assert_eq!(summary, [(1, "b"), (2, "a")]);
    }

    #[test]
    fn feed_entry_serializes() {
        let (mut network, clock) = test_network();
        let ada = network.register("ada", "pw").unwrap();
        publish_at(&mut network, &clock, &ada, "json", 1);

        let mut feed = network.feed(&ada).unwrap();
        let entries = collect_page(&mut feed, 1).unwrap();
        let value = serde_json::to_value(&entries[0]).unwrap();

        assert_eq!(value["index"], 1);
        assert_eq!(value["author"], "ada");
        assert_eq!(value["text"], "json");
        assert_eq!(value["like_count"], 0);
        assert_eq!(value["created_at"], "2024-01-01T00:01:00Z");
    }

    #[test]
    fn truncate_long_string() {
        let long = "a".repeat(300);
        let out = truncate(&long, 280);
        assert_eq!(out.chars().count(), 280);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn truncate_keeps_multibyte_characters_whole() {
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn render_profile_basic() {
        let (mut network, clock) = test_network();
        let ada = network.register("ada", "pw").unwrap();
        let bob = network.register("bob", "pw").unwrap();
        publish_at(&mut network, &clock, &ada, "x", 5);
        network.follow(&ada, &bob).unwrap();

        let out = render_profile(network.user(&ada).unwrap());
        assert!(out.contains("# User: ada"));
        assert!(out.contains("- **Posts:** 1"));
        assert!(out.contains("- **Following:** 1"));
        assert!(out.contains("- **Last Post:** 2024-01-01 00:05 UTC"));
    }

    #[test]
    fn render_profile_without_posts() {
        let (mut network, _) = test_network();
        let ada = network.register("ada", "pw").unwrap();

        let out = render_profile(network.user(&ada).unwrap());
        assert!(out.contains("- **Posts:** 0"));
        assert!(!out.contains("Last Post"));
    }
}
