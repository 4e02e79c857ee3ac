//! Post domain entity
//!
//! A post is immutable once created, except for the set of users who liked it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message published by a user
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    id: PostId,
    text: String,
    created_at: DateTime<Utc>,
    liked_by: HashSet<UserId>,
}

impl Post {
    /// Create a post stamped with the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_timestamp(text, Utc::now())
    }

    /// Create a post stamped with an explicit time
    pub fn with_timestamp(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: PostId::new(),
            text: text.into(),
            created_at,
            liked_by: HashSet::new(),
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True iff this post was created strictly before `other`
    pub fn is_before(&self, other: &Post) -> bool {
        self.created_at < other.created_at
    }

    /// True iff this post was created strictly after `other`
    pub fn is_after(&self, other: &Post) -> bool {
        self.created_at > other.created_at
    }

    /// Record a like. Returns false if `user` had already liked this post.
    ///
    /// Authors may like their own posts.
    pub fn add_like_from(&mut self, user: UserId) -> bool {
        self.liked_by.insert(user)
    }

    pub fn has_like_from(&self, user: &UserId) -> bool {
        self.liked_by.contains(user)
    }

    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    /// Users who liked this post. The returned set is a copy.
    pub fn likers(&self) -> HashSet<UserId> {
        self.liked_by.clone()
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Post {}
