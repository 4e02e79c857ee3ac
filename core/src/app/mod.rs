//! Application layer
//!
//! The network that owns every user, and the news feed that merges their
//! streams.

pub mod network;
pub mod news_feed;

pub use network::Network;
pub use news_feed::Feed;
