//! Seed files
//!
//! A seed is a JSON description of a network: users, who they follow, what
//! they posted (relative to now) and which posts they liked. Users are
//! referenced by name; posts in `likes` by their index in the author's
//! newest-first stream.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use microdon_core::Network;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedUser {
    pub name: String,
    pub credential: String,
    #[serde(default)]
    pub follows: Vec<String>,
    #[serde(default)]
    pub posts: Vec<SeedPost>,
    #[serde(default)]
    pub likes: Vec<SeedLike>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedPost {
    pub text: String,
    pub minutes_ago: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedLike {
    pub author: String,
    pub post: usize,
}

impl Seed {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid seed file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse seed JSON")
    }

    /// Build a network, placing posts relative to `now`.
    pub fn build(&self, now: DateTime<Utc>) -> Result<Network> {
        let mut network = Network::new();

        for user in &self.users {
            network
                .register(&user.name, &user.credential)
                .with_context(|| format!("Failed to register '{}'", user.name))?;
        }

        for user in &self.users {
            let id = user_id(&network, &user.name)?;

            // Oldest first, so every post lands at the head of the stream.
            let mut posts: Vec<&SeedPost> = user.posts.iter().collect();
            posts.sort_by_key(|p| std::cmp::Reverse(p.minutes_ago));
            for post in posts {
                let at = now - Duration::minutes(post.minutes_ago);
                network
                    .publish_at(&id, &post.text, at)
                    .with_context(|| format!("Failed to publish for '{}'", user.name))?;
            }

            for followee in &user.follows {
                let followee_id = user_id(&network, followee)
                    .with_context(|| format!("'{}' follows unknown user", user.name))?;
                if !network.follow(&id, &followee_id)? {
                    tracing::warn!(user = %user.name, followee = %followee, "Ignored follow");
                }
            }
        }

        // Likes refer to post indices, so they go in once every stream is complete.
        for user in &self.users {
            let id = user_id(&network, &user.name)?;
            for like in &user.likes {
                let author = user_id(&network, &like.author)?;
                network
                    .like(&id, &author, like.post)
                    .with_context(|| format!("'{}' likes a missing post", user.name))?;
            }
        }

        tracing::info!(users = network.len(), "Seed loaded");
        Ok(network)
    }
}

fn user_id(network: &Network, name: &str) -> Result<microdon_core::UserId> {
    match network.find_by_name(name) {
        Some(user) => Ok(user.id()),
        None => bail!("Unknown user '{}'", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microdon_core::Cursor;

    const EXAMPLE: &str = include_str!("../seed.example.json");

    #[test]
    fn example_seed_builds() {
        let seed = Seed::parse(EXAMPLE).unwrap();
        let network = seed.build(Utc::now()).unwrap();

        assert_eq!(network.len(), 3);
        let ada = network.find_by_name("ada").unwrap();
        assert_eq!(ada.post_count(), 2);
        assert_eq!(ada.subscription_count(), 2);
        assert_eq!(ada.posts()[0].text(), "Part two is longer than expected.");
        assert_eq!(ada.posts()[0].like_count(), 1);
    }

    #[test]
    fn example_feed_is_time_ordered() {
        let now = Utc::now();
        let mut network = Seed::parse(EXAMPLE).unwrap().build(now).unwrap();
        let ada = network.find_by_name("ada").unwrap().id();

        let mut feed = network.feed(&ada).unwrap();
        let mut times = Vec::new();
        while feed.has_next() {
            times.push(feed.next().unwrap().created_at());
        }
        assert_eq!(times.len(), 5);
        assert!(times.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(times[0], now - Duration::minutes(10));
    }

    #[test]
    fn posts_and_follows_go_through_the_network() {
        let seed = Seed::parse(EXAMPLE).unwrap();
        let network = seed.build(Utc::now()).unwrap();

        let posts: usize = seed.users.iter().map(|u| u.posts.len()).sum();
        let follows: usize = seed.users.iter().map(|u| u.follows.len()).sum();
        assert_eq!(network.revision(), (posts + follows) as u64);
    }

    #[test]
    fn unknown_follow_is_an_error() {
        let seed = Seed::parse(
            r#"{ "users": [ { "name": "ada", "credential": "pw", "follows": ["nobody"] } ] }"#,
        )
        .unwrap();
        let err = seed.build(Utc::now()).unwrap_err();
        assert!(format!("{:#}", err).contains("nobody"));
    }

    #[test]
    fn duplicate_users_are_an_error() {
        let seed = Seed::parse(
            r#"{ "users": [
                { "name": "ada", "credential": "pw" },
                { "name": "ada", "credential": "pw" }
            ] }"#,
        )
        .unwrap();
        assert!(seed.build(Utc::now()).is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Seed::parse(r#"{ "users": [], "extra": 1 }"#).is_err());
    }

    #[test]
    fn like_of_missing_post_is_an_error() {
        let seed = Seed::parse(
            r#"{ "users": [
                { "name": "ada", "credential": "pw", "likes": [ { "author": "ada", "post": 3 } ] }
            ] }"#,
        )
        .unwrap();
        assert!(seed.build(Utc::now()).is_err());
    }
}
