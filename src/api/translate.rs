use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use super::{send_json, ApiError};

/// Fixed language pair for title translation.
pub const SOURCE_LANG: &str = "ja";
pub const TARGET_LANG: &str = "en";

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `texts` as plain text. Implementations return one output per input, in input order.
    async fn translate(&self, texts: &[String], source: &str, target: &str) -> Result<Vec<String>, ApiError>;
}

#[derive(Clone)]
pub struct GoogleTranslator {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl GoogleTranslator {
    pub fn new(http: HttpClient, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into(), api_key: api_key.into() }
    }

    fn endpoint(&self) -> String {
        format!("{}/language/translate/v2", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, texts: &[String], source: &str, target: &str) -> Result<Vec<String>, ApiError> {
        let body = ApiTranslateRequest { q: texts, source, target, format: "text" };
        let req = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body);
        let resp: ApiTranslateResponse = send_json(req).await?;
        Ok(resp.data.translations.into_iter().map(|t| t.translated_text).collect())
    }
}

#[derive(Debug, Serialize)]
struct ApiTranslateRequest<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiTranslateResponse {
    data: ApiTranslations,
}

#[derive(Debug, Deserialize)]
struct ApiTranslations {
    #[serde(default)]
    translations: Vec<ApiTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTranslation {
    translated_text: String,
}
