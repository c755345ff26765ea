mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./shelfcast.toml",
        "./config.toml",
        "~/.config/shelfcast/config.toml",
        "/etc/shelfcast/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    match (&config.auth.username, &config.auth.password) {
        (Some(_), None) => anyhow::bail!("Auth username is set but password is missing"),
        (None, Some(_)) => anyhow::bail!("Auth password is set but username is missing"),
        _ => {}
    }

    if let Some(base_url) = &config.server.base_url {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!("Base URL must start with http:// or https://: {}", base_url);
        }
    }

    if !config.library.root.exists() {
        tracing::warn!("Library root does not exist: {:?}", config.library.root);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_to_missing_sections() {
        let file = write_config("[library]\nroot = \"/srv/books\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.library.root, Path::new("/srv/books"));
        assert_eq!(config.library.cache_path, Path::new("./cache/audiobooks.json"));
        assert_eq!(config.server.port, 8085);
        assert!(config.server.show_path);
        assert!(config.auth.credentials().is_none());
    }

    #[test]
    fn full_config_parses() {
        let file = write_config(
            r#"
[library]
root = "/srv/books"
cache_path = "/var/cache/shelfcast.json"

[server]
host = "0.0.0.0"
port = 9000
base_url = "https://books.example/"
show_path = false

[auth]
username = "listener"
password = "secret"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.base_url.as_deref(), Some("https://books.example/"));
        assert!(!config.server.show_path);
        assert_eq!(config.auth.credentials(), Some(("listener", "secret")));
    }

    #[test]
    fn zero_port_is_rejected() {
        let file = write_config("[server]\nport = 0\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn half_credentials_are_rejected() {
        let file = write_config("[auth]\nusername = \"listener\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn base_url_needs_scheme() {
        let file = write_config("[server]\nbase_url = \"books.example\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(load_config_or_default(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }
}
