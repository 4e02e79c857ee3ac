//! Microdon core
//!
//! A minimal social network: users publish posts, follow each other, and read
//! a news feed that merges their own posts with those of everyone they
//! follow, newest first, behind a bidirectional cursor.
//!
//! ```
//! use microdon_core::{Cursor, Network};
//!
//! let mut network = Network::new();
//! let ada = network.register("ada", "s3cret").unwrap();
//! let bob = network.register("bob", "hunter2").unwrap();
//! network.publish(&ada, "hello").unwrap();
//! network.publish(&bob, "hi ada").unwrap();
//! network.follow(&ada, &bob).unwrap();
//!
//! let mut feed = network.feed(&ada).unwrap();
//! assert_eq!(feed.size(), 2);
//! while feed.has_next() {
//!     let post = feed.next().unwrap();
//!     println!("{}", post.text());
//! }
//! ```

pub mod app;
pub mod domain;
pub mod error;
pub mod feed;

#[cfg(test)]
mod test_utils;


pub use app::{Feed, Network};
pub use domain::cursor::{Cursor, CursorPosition};
pub use domain::entities::{Credential, Post, PostId, User, UserId};
pub use domain::ports::{Clock, SystemClock};
pub use error::DomainError;
