use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::thecamp::Recipient;
use crate::util::time::parse_date;

const DEFAULT_REPORT_DIR: &str = "reports";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_TRANSLATE_BASE_URL: &str = "https://translation.googleapis.com";
const DEFAULT_THECAMP_BASE_URL: &str = "https://www.thecamp.or.kr";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required setting {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Process-wide settings, built once in `main` and passed down by reference.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub youtube_api_key: Option<String>,
    pub translate_api_key: Option<String>,
    pub report_dir: PathBuf,
    pub camp_user: Option<String>,
    pub camp_pass: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_birth: Option<String>,
    pub recipient_entrance: Option<String>,
    pub http_timeout: Duration,
    pub concurrency: Option<usize>,
    pub youtube_base_url: String,
    pub translate_base_url: String,
    pub camp_base_url: String,
}

/// Keys needed by the fetch-and-translate pipeline.
#[derive(Clone, Debug)]
pub struct ScrapeSettings {
    pub youtube_api_key: String,
    pub translate_api_key: String,
}

/// Credentials and recipient identity for the delivery endpoint.
#[derive(Clone, Debug)]
pub struct DeliverySettings {
    pub user: String,
    pub pass: String,
    pub recipient: Recipient,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        let http_timeout = match get("CAMPFEED_HTTP_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v.trim().parse().map_err(|e| ConfigError::Invalid {
                    var: "CAMPFEED_HTTP_TIMEOUT_SECS",
                    reason: format!("{e}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid { var: "CAMPFEED_HTTP_TIMEOUT_SECS", reason: "must be positive".into() });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let concurrency = match get("CAMPFEED_CONCURRENCY") {
            Some(v) => {
                let n: usize = v.trim().parse().map_err(|e| ConfigError::Invalid {
                    var: "CAMPFEED_CONCURRENCY",
                    reason: format!("{e}"),
                })?;
                if n == 0 {
                    return Err(ConfigError::Invalid { var: "CAMPFEED_CONCURRENCY", reason: "must be positive".into() });
                }
                Some(n)
            }
            None => None,
        };

        Ok(Self {
            youtube_api_key: get("YOUTUBE_API_KEY"),
            translate_api_key: get("TRANSLATE_API_KEY"),
            report_dir: get("REPORT_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR)),
            camp_user: get("THECAMP_USER"),
            camp_pass: get("THECAMP_PASS"),
            recipient_name: get("THECAMP_RECIPIENT_NAME"),
            recipient_birth: get("THECAMP_RECIPIENT_BIRTH"),
            recipient_entrance: get("THECAMP_RECIPIENT_ENTRANCE"),
            http_timeout,
            concurrency,
            youtube_base_url: base_url(get("YOUTUBE_BASE_URL"), "YOUTUBE_BASE_URL", DEFAULT_YOUTUBE_BASE_URL)?,
            translate_base_url: base_url(get("TRANSLATE_BASE_URL"), "TRANSLATE_BASE_URL", DEFAULT_TRANSLATE_BASE_URL)?,
            camp_base_url: base_url(get("THECAMP_BASE_URL"), "THECAMP_BASE_URL", DEFAULT_THECAMP_BASE_URL)?,
        })
    }

    pub fn require_scrape(&self) -> Result<ScrapeSettings, ConfigError> {
        Ok(ScrapeSettings {
            youtube_api_key: required(&self.youtube_api_key, "YOUTUBE_API_KEY")?,
            translate_api_key: required(&self.translate_api_key, "TRANSLATE_API_KEY")?,
        })
    }

    pub fn require_delivery(&self) -> Result<DeliverySettings, ConfigError> {
        let user = required(&self.camp_user, "THECAMP_USER")?;
        let pass = required(&self.camp_pass, "THECAMP_PASS")?;
        let name = required(&self.recipient_name, "THECAMP_RECIPIENT_NAME")?;
        let birth = required(&self.recipient_birth, "THECAMP_RECIPIENT_BIRTH")?;
        let entrance = required(&self.recipient_entrance, "THECAMP_RECIPIENT_ENTRANCE")?;
        Ok(DeliverySettings {
            user,
            pass,
            recipient: Recipient {
                name,
                birth: date(&birth, "THECAMP_RECIPIENT_BIRTH")?,
                entrance: date(&entrance, "THECAMP_RECIPIENT_ENTRANCE")?,
            },
        })
    }

    /// Shared HTTP client; the timeout applies uniformly to every external call.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder().timeout(self.http_timeout).build()
    }
}

fn required(v: &Option<String>, var: &'static str) -> Result<String, ConfigError> {
    v.clone().ok_or(ConfigError::Missing(var))
}

fn date(v: &str, var: &'static str) -> Result<chrono::NaiveDate, ConfigError> {
    parse_date(v).ok_or_else(|| ConfigError::Invalid { var, reason: format!("expected YYYY-MM-DD or YYYYMMDD, got {v:?}") })
}

fn base_url(v: Option<String>, var: &'static str, default: &str) -> Result<String, ConfigError> {
    let raw = v.unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::Invalid { var, reason: format!("{e}") })?;
    Ok(raw.trim_end_matches('/').to_string())
}
