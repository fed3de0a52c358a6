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

    // Try default locations
    let default_paths = ["./marquee.toml", "~/.config/marquee/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.scrape.timeout_secs == 0 {
        anyhow::bail!("Scrape timeout cannot be 0");
    }

    if config.cache.path.as_os_str().is_empty() {
        anyhow::bail!("Cache path cannot be empty");
    }

    if config.report.columns.is_empty() {
        anyhow::bail!("Report needs at least one column");
    }

    for (name, url) in [
        ("imdb_url", &config.sources.imdb_url),
        ("imdb_search_url", &config.sources.imdb_search_url),
        ("letterboxd_url", &config.sources.letterboxd_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("Source '{}' is not an http(s) URL: {}", name, url);
        }
    }

    if config.scrape.delay_ms == 0 {
        tracing::warn!("Scrape delay is 0; requests will not be rate limited");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let file = write_config("[scrape]\ndelay_ms = 250\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.scrape.delay_ms, 250);
        assert_eq!(config.scrape.timeout_secs, 30);
        assert_eq!(config.cache.path, Path::new("movies.json"));
        assert_eq!(config.report.columns.len(), 12);
        assert_eq!(config.report.skip_genres, ["Short"]);
    }

    #[test]
    fn explicit_empty_skip_list_is_kept() {
        let file = write_config("[report]\nskip_genres = []\n");
        let config = load_config(file.path()).unwrap();
        assert!(config.report.skip_genres.is_empty());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let file = write_config("[scrape]\ntimeout_secs = 0\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn empty_columns_are_rejected() {
        let file = write_config("[report]\ncolumns = []\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn non_http_source_is_rejected() {
        let file = write_config("[sources]\nimdb_url = \"ftp://imdb.com\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load_config_or_default(Some(Path::new("/nonexistent/marquee.toml"))).is_err());
    }
}
