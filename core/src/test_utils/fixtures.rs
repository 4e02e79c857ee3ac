//! Test fixtures
//!
//! Factory functions for networks with a controlled timeline, and the feed
//! invariant checks shared by the cursor tests.

use std::sync::Arc;

use chrono::Duration;
use rand::Rng;

use crate::app::{Feed, Network};
use crate::domain::cursor::Cursor;
use crate::domain::entities::{PostId, UserId};

use super::ManualClock;

/// Network driven by a `ManualClock`
pub fn test_network() -> (Network, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    (Network::with_clock(clock.clone()), clock)
}

/// Publish at `minute` minutes after the clock's start
pub fn publish_at(
    network: &mut Network,
    clock: &ManualClock,
    author: &UserId,
    text: &str,
    minute: i64,
) -> PostId {
    clock.set(ManualClock::start() + Duration::minutes(minute));
    network.publish(author, text).unwrap()
}

/// A network with `users` members, up to `max_posts` posts each, and random
/// follows. The clock advances 0 to 2 seconds between posts, so some posts
/// share a timestamp.
pub fn random_network<R: Rng>(
    rng: &mut R,
    users: usize,
    max_posts: usize,
) -> (Network, Vec<UserId>) {
    let (mut network, clock) = test_network();
    let ids: Vec<UserId> = (0..users)
        .map(|i| network.register(&format!("user-{}", i), "pw").unwrap())
        .collect();

    let total_posts = rng.gen_range(0..=users * max_posts);
    for n in 0..total_posts {
        let author = ids[rng.gen_range(0..ids.len())];
        if network.user(&author).unwrap().post_count() >= max_posts {
            continue;
        }
        clock.advance(Duration::seconds(rng.gen_range(0..=2)));
        network.publish(&author, &format!("post-{}", n)).unwrap();
    }

    for follower in &ids {
        for followee in &ids {
            if rng.gen_bool(0.4) {
                network.follow(follower, followee).unwrap();
            }
        }
    }

    (network, ids)
}

/// Check every feed invariant that holds while the traversal snapshot
/// matches the owner's current subscriptions.
pub fn assert_feed_invariants(feed: &Feed<'_>) {
    let network = feed.network();
    let owner = feed.owner().expect("feed owner must exist");

    let expected_size = owner.post_count()
        + owner
            .subscriptions()
            .iter()
            .map(|id| network.user(id).expect("subscription must exist").post_count())
            .sum::<usize>();
    let size = feed.size();
    assert_eq!(size, expected_size);

    assert!(!owner.has_subscription_to(&owner.id()));

    match feed.previous_index() {
        Some(prev) => assert_eq!(feed.next_index(), prev + 1),
        None => assert_eq!(feed.next_index(), 0),
    }
    assert!(feed.next_index() <= size);
    if let Some(prev) = feed.previous_index() {
        assert!(prev < size);
    }

    if let Some(last) = feed.last_index() {
        assert!(last == feed.next_index() || Some(last) == feed.previous_index());
        assert!(last < size);
    }
    assert_eq!(feed.last_index().is_none(), feed.last_user().is_none());
    if let Some(author) = feed.last_user() {
        assert!(author == feed.owner_id() || owner.has_subscription_to(&author));
    }

    assert_eq!(!feed.has_previous(), feed.previous_index().is_none());
    assert_eq!(!feed.has_next(), feed.next_index() == size);
}
