//! News feed
//!
//! A feed shows its owner's posts together with the posts of everyone the
//! owner follows, newest first, behind a single bidirectional cursor.
//!
//! Nothing is sorted or copied. Each participant's own stream is already
//! newest first, so the feed keeps one cursor per participant and, on every
//! step, moves the one whose candidate comes first in the merged order:
//!
//! - `next()` takes the newest of the participants' next posts, ties going
//!   to the earlier participant (owner first, then follow order);
//! - `previous()` gives back the post the merge consumed last, which is the
//!   oldest of the participants' previous posts, ties going to the later
//!   participant.
//!
//! The participant list is snapshotted by [`Feed::start_iteration`]. Nobody
//! may publish or change a subscription list between a restart and the end
//! of the traversal. The feed detects either through the network revision
//! and fails with [`DomainError::StaleTraversal`] until restarted.

use chrono::{DateTime, Utc};

use crate::app::Network;
use crate::domain::cursor::{Cursor, CursorPosition};
use crate::domain::entities::{Post, User, UserId};
use crate::error::DomainError;

/// Merged, newest-first view over a user's own posts and their subscriptions'
pub struct Feed<'a> {
    network: &'a mut Network,
    owner: UserId,
    /// Owner first, then subscriptions in follow order, as of the last restart.
    participants: Vec<UserId>,
    position: CursorPosition,
    /// Set together with `position.last_index()`.
    last_user: Option<UserId>,
    revision: u64,
}

impl<'a> Feed<'a> {
    /// Open `owner`'s feed, positioned before the newest post.
    pub fn new(network: &'a mut Network, owner: UserId) -> Result<Self, DomainError> {
        if network.user(&owner).is_none() {
            return Err(DomainError::UserNotFound(owner));
        }

        let mut feed = Self {
            revision: network.revision(),
            network,
            owner,
            participants: Vec::new(),
            position: CursorPosition::new(),
            last_user: None,
        };
        feed.start_iteration();
        Ok(feed)
    }

    pub fn owner_id(&self) -> UserId {
        self.owner
    }

    pub fn owner(&self) -> Option<&User> {
        self.network.user(&self.owner)
    }

    /// Streams taking part in the current traversal
    pub fn participants(&self) -> &[UserId] {
        &self.participants
    }

    /// Total number of posts across the owner and its current subscriptions.
    ///
    /// Evaluated live, not against the traversal snapshot.
    pub fn size(&self) -> usize {
        let Some(owner) = self.network.user(&self.owner) else {
            return 0;
        };
        owner.post_count()
            + owner
                .subscriptions()
                .iter()
                .filter_map(|id| self.network.user(id))
                .map(User::post_count)
                .sum::<usize>()
    }

    /// Author of the post returned by the last `next()` or `previous()`
    pub fn last_user(&self) -> Option<UserId> {
        self.last_user
    }

    pub fn network(&self) -> &Network {
        &*self.network
    }

    /// Mutable access to the underlying network, e.g. to follow someone
    /// before the next restart.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut *self.network
    }

    fn participant(&self, id: &UserId) -> Option<&User> {
        self.network.user(id)
    }

    fn ensure_fresh(&self) -> Result<(), DomainError> {
        if self.revision == self.network.revision() {
            return Ok(());
        }
        tracing::warn!(
            owner = %self.owner,
            started_at = self.revision,
            current = self.network.revision(),
            "Feed traversal is stale, restart required"
        );
        Err(DomainError::StaleTraversal)
    }

    /// Participant holding the newest unread post
    fn select_next(&self) -> Option<UserId> {
        let mut best: Option<(UserId, DateTime<Utc>)> = None;
        for id in &self.participants {
            let Some(candidate) = self.participant(id).and_then(|u| u.peek_next()) else {
                continue;
            };
            let at = candidate.created_at();
            if best.map_or(true, |(_, best_at)| at > best_at) {
                best = Some((*id, at));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Participant holding the post consumed last
    fn select_previous(&self) -> Option<UserId> {
        let mut best: Option<(UserId, DateTime<Utc>)> = None;
        for id in &self.participants {
            let Some(candidate) = self.participant(id).and_then(|u| u.peek_previous()) else {
                continue;
            };
            let at = candidate.created_at();
            if best.map_or(true, |(_, best_at)| at <= best_at) {
                best = Some((*id, at));
            }
        }
        best.map(|(id, _)| id)
    }
}

impl Cursor for Feed<'_> {
    type Item = Post;

    /// Snapshot the owner's subscriptions and rewind every participant.
    fn start_iteration(&mut self) {
        let subscriptions = self
            .network
            .user(&self.owner)
            .map(User::subscriptions)
            .unwrap_or_default();

        self.participants.clear();
        self.participants.push(self.owner);
        for id in subscriptions {
            if self.network.user(&id).is_some() {
                self.participants.push(id);
            } else {
                tracing::warn!(owner = %self.owner, subscription = %id, "Skipping unknown subscription");
            }
        }

        for id in &self.participants {
            if let Ok(user) = self.network.participant_mut(id) {
                user.start_iteration();
            }
        }

        self.position.reset();
        self.last_user = None;
        self.revision = self.network.revision();

        tracing::debug!(
            owner = %self.owner,
            participants = self.participants.len(),
            "Feed iteration started"
        );
    }

    fn has_next(&self) -> bool {
        self.participants
            .iter()
            .filter_map(|id| self.participant(id))
            .any(|u| u.has_next())
    }

    fn has_previous(&self) -> bool {
        self.participants
            .iter()
            .filter_map(|id| self.participant(id))
            .any(|u| u.has_previous())
    }

    fn next(&mut self) -> Result<&Post, DomainError> {
        self.ensure_fresh()?;
        let winner = self.select_next().ok_or(DomainError::NoNextElement)?;

        let post = self.network.participant_mut(&winner)?.next()?;
        self.position.advance();
        self.last_user = Some(winner);
        Ok(post)
    }

    fn previous(&mut self) -> Result<&Post, DomainError> {
        self.ensure_fresh()?;
        let winner = self
            .select_previous()
            .ok_or(DomainError::NoPreviousElement)?;

        let post = self.network.participant_mut(&winner)?.previous()?;
        self.position.retreat();
        self.last_user = Some(winner);
        Ok(post)
    }

    fn next_index(&self) -> usize {
        self.position.next_index()
    }

    fn previous_index(&self) -> Option<usize> {
        self.position.previous_index()
    }

    fn last_index(&self) -> Option<usize> {
        self.position.last_index()
    }
}

impl std::fmt::Debug for Feed<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feed")
            .field("owner", &self.owner)
            .field("participants", &self.participants)
            .field("position", &self.position)
            .field("last_user", &self.last_user)
            .finish()
    }
}
