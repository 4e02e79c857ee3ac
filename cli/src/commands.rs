//! Subcommand implementations
//!
//! Each command renders to a `String`; `main` decides where it goes.

use anyhow::{Context, Result};
use microdon_core::feed::{render_page, render_profile};
use microdon_core::Network;

/// Render the first `limit` posts of `name`'s news feed
pub fn feed(network: &mut Network, name: &str, limit: usize) -> Result<String> {
    let owner = network
        .find_by_name(name)
        .with_context(|| format!("Unknown user '{}'", name))?
        .id();
    let mut feed = network.feed(&owner)?;
    let page = render_page(&mut feed, limit)?;
    Ok(page)
}

pub fn profile(network: &Network, name: &str) -> Result<String> {
    let user = network
        .find_by_name(name)
        .with_context(|| format!("Unknown user '{}'", name))?;
    Ok(render_profile(user))
}

/// One line per user: name, post count, following count
pub fn users(network: &Network) -> String {
    let mut buf = String::new();
    for user in network.users() {
        buf.push_str(&format!(
            "{:<16} {:>4} posts {:>4} following\n",
            user.name(),
            user.post_count(),
            user.subscription_count()
        ));
    }
    buf
}
