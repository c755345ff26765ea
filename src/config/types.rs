use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Directory whose subdirectories are books
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Index cache written by `shelfcast scan`
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from("./audiobooks")
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("./cache/audiobooks.json")
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            cache_path: default_cache_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Public URL feeds link back to; derived from the `Host` header when unset
    #[serde(default)]
    pub base_url: Option<String>,

    /// Include book directories in the listing
    #[serde(default = "default_show_path")]
    pub show_path: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8085
}
fn default_show_path() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            show_path: default_show_path(),
        }
    }
}

/// HTTP basic-auth credentials guarding the listing. Feeds and media stay
/// open so podcast clients can fetch them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl AuthConfig {
    /// Both halves of the credential pair, when configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }
}
