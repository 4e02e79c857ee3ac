//! Domain entities
//!
//! Users and the posts they publish. Entities refer to each other through
//! [`UserId`] keys rather than references.

pub mod post;
pub mod user;

pub use post::{Post, PostId};
pub use user::{Credential, User, UserId};
