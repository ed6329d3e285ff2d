//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use bazaar_infra::database::DatabaseConfig;

/// Where uploaded images live and how they are served.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Directory files are written to.
    pub root: PathBuf,
    /// URL prefix the files are served under, always ending in `/`.
    pub url: String,
    /// Largest accepted image upload.
    pub max_upload_bytes: usize,
}

impl MediaConfig {
    /// Path to mount the file service on, if the media URL is local.
    pub fn mount_path(&self) -> Option<&str> {
        self.url
            .starts_with('/')
            .then(|| self.url.trim_end_matches('/'))
            .filter(|p| !p.is_empty())
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub media: MediaConfig,
    /// JSON fixtures to seed the in-memory catalog with.
    pub fixtures_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut db = DatabaseConfig::new(url);
            db.max_connections = parse_var("DB_MAX_CONNECTIONS", db.max_connections);
            db.min_connections = parse_var("DB_MIN_CONNECTIONS", db.min_connections);
            db
        });

        let media = MediaConfig {
            root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("media")),
            url: normalize_media_url(&env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".into())),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database,
            media,
            fixtures_path: env::var("FIXTURES_PATH").ok().map(PathBuf::from),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn normalize_media_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/media/".to_string();
    }
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(url: &str) -> MediaConfig {
        MediaConfig {
            root: PathBuf::from("media"),
            url: normalize_media_url(url),
            max_upload_bytes: 1,
        }
    }

    #[test]
    fn media_url_gets_trailing_slash() {
        assert_eq!(normalize_media_url("/media"), "/media/");
        assert_eq!(normalize_media_url("/uploads/"), "/uploads/");
        assert_eq!(normalize_media_url("  "), "/media/");
    }

    #[test]
    fn only_local_media_urls_are_mounted() {
        assert_eq!(media("/media/").mount_path(), Some("/media"));
        assert_eq!(media("https://cdn.example.com/m/").mount_path(), None);
        assert_eq!(media("/").mount_path(), None);
    }
}
