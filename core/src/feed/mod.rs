//! Feed module
//!
//! Markdown rendering of feeds and profiles.

pub mod renderer;

pub use renderer::{collect_page, render_page, render_profile, FeedEntry};
