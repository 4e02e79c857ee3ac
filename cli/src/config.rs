use std::env;
use std::path::PathBuf;

/// Defaults for the CLI, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON seed describing users, posts and follows
    pub seed_path: PathBuf,
    /// Posts shown per feed page
    pub page_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            seed_path: lookup("MICRODON_SEED")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("seed.json")),
            page_size: lookup("MICRODON_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(20),
        }
    }
}
