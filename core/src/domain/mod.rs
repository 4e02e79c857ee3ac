//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Users and posts
//! - `cursor`: The bidirectional cursor shared by user streams and feeds
//! - `ports`: Trait definitions for external dependencies

pub mod cursor;
pub mod entities;
pub mod ports;
