use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CloudError, Result};
use crate::text::{StopwordLanguage, StopwordSet};

/// Default Twitter REST API base (v1.1).
pub const DEFAULT_API_URL: &str = "https://api.twitter.com/1.1";

/// Bundled font, resolved relative to the crate so it works from any cwd.
pub const DEFAULT_FONT_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/arabic-english.ttf");

/// The four OAuth 1.0a secrets for a user-context app.
///
/// Deserializes from the `keys.json` layout:
/// `{"CONSUMER_KEY": "...", "CONSUMER_SECRET": "...", "ACCESS_TOKEN": "...", "ACCESS_SECRET": "..."}`
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(rename = "CONSUMER_KEY")]
    pub consumer_key: String,
    #[serde(rename = "CONSUMER_SECRET")]
    pub consumer_secret: String,
    #[serde(rename = "ACCESS_TOKEN")]
    pub access_token: String,
    #[serde(rename = "ACCESS_SECRET")]
    pub access_secret: String,
}

// Never print secret values, even in debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read credentials from a JSON key file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CloudError::Configuration(format!("cannot read key file {}: {e}", path.display()))
        })?;
        let creds: Credentials = serde_json::from_str(&raw).map_err(|e| {
            CloudError::Configuration(format!("malformed key file {}: {e}", path.display()))
        })?;
        creds.validate()?;
        Ok(creds)
    }

    /// Read credentials from `TWITTER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let creds = Self {
            consumer_key: env::var("TWITTER_CONSUMER_KEY").unwrap_or_default(),
            consumer_secret: env::var("TWITTER_CONSUMER_SECRET").unwrap_or_default(),
            access_token: env::var("TWITTER_ACCESS_TOKEN").unwrap_or_default(),
            access_secret: env::var("TWITTER_ACCESS_SECRET").unwrap_or_default(),
        };
        creds.validate().map_err(|e| {
            CloudError::Configuration(format!(
                "{e}\nSet the TWITTER_* variables in your .env file or pass --keys <keys.json>."
            ))
        })?;
        Ok(creds)
    }

    /// Every field must be non-blank.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("CONSUMER_KEY", &self.consumer_key),
            ("CONSUMER_SECRET", &self.consumer_secret),
            ("ACCESS_TOKEN", &self.access_token),
            ("ACCESS_SECRET", &self.access_secret),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(CloudError::Configuration(format!(
                "missing credentials: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded by `main` via dotenvy before this runs. Credentials
/// are resolved separately by [`Config::credentials`] so commands that never
/// touch the API don't need them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the REST API (TWITTER_API_URL)
    pub api_url: String,
    /// Key file path, if one was configured (TWEETCLOUD_KEYS_FILE or --keys)
    pub keys_file: Option<PathBuf>,
    /// Font used to draw the cloud (TWEETCLOUD_FONT_PATH)
    pub font_path: PathBuf,
    /// Stop word languages, unioned (TWEETCLOUD_STOPWORD_LANGUAGES)
    pub stopword_languages: Vec<StopwordLanguage>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// An explicit `keys_file` (from the command line) wins over the env var.
    /// When neither is set, `<config dir>/tweetcloud/keys.json` is used if it
    /// exists.
    pub fn load(keys_file: Option<PathBuf>) -> Result<Self> {
        let stopword_languages = match env::var("TWEETCLOUD_STOPWORD_LANGUAGES") {
            Ok(list) => parse_languages(&list)?,
            Err(_) => vec![StopwordLanguage::English],
        };

        let keys_file = keys_file
            .or_else(|| env::var("TWEETCLOUD_KEYS_FILE").ok().map(PathBuf::from))
            .or_else(|| default_keys_file().filter(|p| p.exists()));

        Ok(Self {
            api_url: env::var("TWITTER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            keys_file,
            font_path: env::var("TWEETCLOUD_FONT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FONT_PATH)),
            stopword_languages,
        })
    }

    /// Resolve credentials: key file if configured, otherwise env vars.
    pub fn credentials(&self) -> Result<Credentials> {
        match &self.keys_file {
            Some(path) => Credentials::from_file(path),
            None => Credentials::from_env(),
        }
    }

    /// Build the configured stop word set.
    pub fn stopwords(&self) -> StopwordSet {
        StopwordSet::from_languages(&self.stopword_languages)
    }

    /// Check that the font asset exists.
    /// Call this before rendering so a missing font fails before any fetch.
    pub fn require_font(&self) -> Result<()> {
        if !self.font_path.is_file() {
            return Err(CloudError::Configuration(format!(
                "font not found at {}\n\
                 Put a TrueType font there or set TWEETCLOUD_FONT_PATH.",
                self.font_path.display()
            )));
        }
        Ok(())
    }
}

/// `~/.config/tweetcloud/keys.json` on Linux.
pub fn default_keys_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tweetcloud").join("keys.json"))
}

/// Parse a comma-separated list of language names.
pub fn parse_languages(list: &str) -> Result<Vec<StopwordLanguage>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}
