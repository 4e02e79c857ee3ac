//! Network
//!
//! The registry that owns every user. Users refer to each other by
//! [`UserId`]; the network resolves those keys, stamps new posts with its
//! clock, and hands out [`Feed`]s.
//!
//! Every publish and every change to a subscription list bumps a revision
//! counter. A feed remembers the revision it started at and refuses to move
//! once it changed, since the streams it is merging are no longer the ones
//! it snapshotted. Likes leave the revision alone.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::app::Feed;
use crate::domain::entities::{PostId, User, UserId};
use crate::domain::ports::{Clock, SystemClock};
use crate::error::DomainError;

/// In-memory social graph
pub struct Network {
    users: HashMap<UserId, User>,
    by_name: HashMap<String, UserId>,
    /// Registration order
    order: Vec<UserId>,
    clock: Arc<dyn Clock>,
    revision: u64,
}

impl Network {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: HashMap::new(),
            by_name: HashMap::new(),
            order: Vec::new(),
            clock,
            revision: 0,
        }
    }

    /// Register a new user. Names are unique.
    pub fn register(&mut self, name: &str, credential: &str) -> Result<UserId, DomainError> {
        if self.by_name.contains_key(name) {
            return Err(DomainError::AlreadyExists(format!("user '{}'", name)));
        }

        let user = User::new(name, credential)?;
        let id = user.id();
        tracing::debug!(user_id = %id, name = %name, "Registered user");

        self.by_name.insert(name.to_string(), id);
        self.order.push(id);
        self.users.insert(id, user);
        Ok(id)
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    /// Mutable access to a user.
    ///
    /// The caller may publish or move the user's cursor through this handle,
    /// so it counts as a modification for any feed traversal in progress.
    pub fn user_mut(&mut self, id: &UserId) -> Option<&mut User> {
        let user = self.users.get_mut(id)?;
        self.revision += 1;
        Some(user)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&User> {
        self.by_name.get(name).and_then(|id| self.users.get(id))
    }

    /// Users in registration order
    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.order.iter().filter_map(|id| self.users.get(id))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Counter bumped by every modification that can invalidate a feed
    /// traversal.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Publish a post for `author`, stamped with the network clock.
    ///
    /// A clock reading older than the author's newest post is raised to that
    /// post's timestamp.
    pub fn publish(&mut self, author: &UserId, text: &str) -> Result<PostId, DomainError> {
        let at = self.clock.now();
        let post_id = self.participant_mut(author)?.add_post_not_before(text, at).id();
        self.record_publish(author, post_id);
        Ok(post_id)
    }

    /// Publish a post for `author` stamped with `at`.
    ///
    /// Fails with [`DomainError::OutOfOrder`] if `at` is older than the
    /// author's newest post.
    pub fn publish_at(
        &mut self,
        author: &UserId,
        text: &str,
        at: DateTime<Utc>,
    ) -> Result<PostId, DomainError> {
        let post_id = self.participant_mut(author)?.add_post_at(text, at)?.id();
        self.record_publish(author, post_id);
        Ok(post_id)
    }

    fn record_publish(&mut self, author: &UserId, post_id: PostId) {
        self.revision += 1;
        tracing::debug!(user_id = %author, post_id = %post_id, "Published post");
    }

    /// `follower` subscribes to `followee`. Returns whether anything changed.
    pub fn follow(&mut self, follower: &UserId, followee: &UserId) -> Result<bool, DomainError> {
        self.ensure_exists(followee)?;
        let user = self
            .users
            .get_mut(follower)
            .ok_or(DomainError::UserNotFound(*follower))?;
        let changed = user.add_subscription(*followee);
        if changed {
            self.revision += 1;
        }

        tracing::debug!(follower = %follower, followee = %followee, changed, "Follow");
        Ok(changed)
    }

    /// `follower` unsubscribes from `followee`. Returns whether anything
    /// changed.
    pub fn unfollow(&mut self, follower: &UserId, followee: &UserId) -> Result<bool, DomainError> {
        let user = self
            .users
            .get_mut(follower)
            .ok_or(DomainError::UserNotFound(*follower))?;
        let changed = user.remove_subscription(followee);
        if changed {
            self.revision += 1;
        }

        tracing::debug!(follower = %follower, followee = %followee, changed, "Unfollow");
        Ok(changed)
    }

    /// `liker` likes the post at `index` in `author`'s stream.
    pub fn like(&mut self, liker: &UserId, author: &UserId, index: usize) -> Result<bool, DomainError> {
        self.ensure_exists(liker)?;
        let post = self
            .users
            .get_mut(author)
            .ok_or(DomainError::UserNotFound(*author))?
            .post_mut(index)
            .ok_or_else(|| DomainError::NotFound(format!("post #{} of {}", index, author)))?;
        Ok(post.add_like_from(*liker))
    }

    /// Open a news feed for `owner`, ready to iterate from the newest post.
    pub fn feed(&mut self, owner: &UserId) -> Result<Feed<'_>, DomainError> {
        Feed::new(self, *owner)
    }

    /// Mutable access that leaves the revision alone.
    pub(crate) fn participant_mut(&mut self, id: &UserId) -> Result<&mut User, DomainError> {
        self.users.get_mut(id).ok_or(DomainError::UserNotFound(*id))
    }

    fn ensure_exists(&self, id: &UserId) -> Result<(), DomainError> {
        if self.users.contains_key(id) {
            Ok(())
        } else {
            Err(DomainError::UserNotFound(*id))
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("users", &self.users.len())
            .field("revision", &self.revision)
            .finish()
    }
}
