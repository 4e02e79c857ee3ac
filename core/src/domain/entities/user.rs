//! User domain entity
//!
//! A user owns its posts, newest first, and the set of users it follows.
//! Followed users are stored as [`UserId`] keys; the [`Network`] resolves
//! them.
//!
//! A user is also a [`Cursor`] over its own posts:
//!
//! ```
//! use microdon_core::domain::cursor::Cursor;
//! use microdon_core::domain::entities::User;
//!
//! let mut user = User::new("ada", "s3cret").unwrap();
//! user.add_post("first");
//! user.add_post("second");
//!
//! user.start_iteration();
//! let mut texts = Vec::new();
//! while user.has_next() {
//!     texts.push(user.next().unwrap().text().to_string());
//! }
//! assert_eq!(texts, ["second", "first"]);
//! ```
//!
//! [`Network`]: crate::app::Network

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::Post;
use crate::domain::cursor::{Cursor, CursorPosition};
use crate::error::DomainError;

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque credential. Only the SHA-256 digest of the secret is kept.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex-encoded digest
    pub fn digest(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// A registered member of the network
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    name: String,
    credential: Credential,
    registered_at: DateTime<Utc>,
    /// Follow order is kept; membership is unique.
    subscriptions: Vec<UserId>,
    /// Newest first.
    posts: Vec<Post>,
    cursor: CursorPosition,
}

impl User {
    /// Register a new user. Name and credential must not be blank.
    pub fn new(name: &str, credential: &str) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::blank("name"));
        }
        if credential.trim().is_empty() {
            return Err(DomainError::blank("credential"));
        }

        Ok(Self {
            id: UserId::new(),
            name: name.to_string(),
            credential: Credential::new(credential),
            registered_at: Utc::now(),
            subscriptions: Vec::new(),
            posts: Vec::new(),
            cursor: CursorPosition::new(),
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    // ========== Subscriptions ==========

    /// Follow `user`. Returns false if already followed or if `user` is self.
    pub fn add_subscription(&mut self, user: UserId) -> bool {
        if user == self.id || self.subscriptions.contains(&user) {
            return false;
        }
        self.subscriptions.push(user);
        true
    }

    /// Stop following `user`. Returns false if it was not followed.
    pub fn remove_subscription(&mut self, user: &UserId) -> bool {
        match self.subscriptions.iter().position(|id| id == user) {
            Some(pos) => {
                self.subscriptions.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn has_subscription_to(&self, user: &UserId) -> bool {
        self.subscriptions.contains(user)
    }

    /// Followed users in follow order. The returned list is a copy.
    pub fn subscriptions(&self) -> Vec<UserId> {
        self.subscriptions.clone()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    // ========== Posts ==========

    /// Publish a post stamped with the current time.
    ///
    /// If the newest post is stamped later than now, the new post takes the
    /// head's timestamp instead.
    pub fn add_post(&mut self, text: &str) -> &Post {
        self.add_post_not_before(text, Utc::now())
    }

    /// Publish a post stamped with `at`, or with the newest post's timestamp
    /// if `at` is older.
    pub fn add_post_not_before(&mut self, text: &str, at: DateTime<Utc>) -> &Post {
        let at = match self.posts.first() {
            Some(head) => at.max(head.created_at()),
            None => at,
        };
        self.insert_post(Post::with_timestamp(text, at))
    }

    /// Publish a post stamped with `at`.
    ///
    /// Fails if `at` is older than the newest post, which would break the
    /// newest-first ordering. Equal timestamps are accepted.
    pub fn add_post_at(&mut self, text: &str, at: DateTime<Utc>) -> Result<&Post, DomainError> {
        if let Some(head) = self.posts.first() {
            if at < head.created_at() {
                return Err(DomainError::OutOfOrder {
                    at,
                    head: head.created_at(),
                });
            }
        }
        Ok(self.insert_post(Post::with_timestamp(text, at)))
    }

    fn insert_post(&mut self, post: Post) -> &Post {
        self.posts.insert(0, post);
        self.cursor.shift_forward();
        &self.posts[0]
    }

    /// Posts, newest first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    pub fn post_mut(&mut self, index: usize) -> Option<&mut Post> {
        self.posts.get_mut(index)
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    // ========== Iteration lookahead ==========

    /// The post `next()` would return, without moving.
    pub fn peek_next(&self) -> Option<&Post> {
        self.posts.get(self.cursor.next_index())
    }

    /// The post `previous()` would return, without moving.
    pub fn peek_previous(&self) -> Option<&Post> {
        self.cursor
            .previous_index()
            .and_then(|index| self.posts.get(index))
    }
}

impl Cursor for User {
    type Item = Post;

    fn start_iteration(&mut self) {
        self.cursor.reset();
    }

    fn has_next(&self) -> bool {
        self.cursor.next_index() < self.posts.len()
    }

    fn has_previous(&self) -> bool {
        self.cursor.previous_index().is_some()
    }

    fn next(&mut self) -> Result<&Post, DomainError> {
        if !self.has_next() {
            return Err(DomainError::NoNextElement);
        }
        let index = self.cursor.advance();
        Ok(&self.posts[index])
    }

    fn previous(&mut self) -> Result<&Post, DomainError> {
        let index = self.cursor.retreat().ok_or(DomainError::NoPreviousElement)?;
        Ok(&self.posts[index])
    }

    fn next_index(&self) -> usize {
        self.cursor.next_index()
    }

    fn previous_index(&self) -> Option<usize> {
        self.cursor.previous_index()
    }

    fn last_index(&self) -> Option<usize> {
        self.cursor.last_index()
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}
