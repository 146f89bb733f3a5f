use std::time::Duration;

use futures_util::StreamExt;
use jobdeck_core::{JobPage, JobRecord};
use jobdeck_logging::{jobdeck_debug, jobdeck_info, jobdeck_warn};
use serde_json::Value;
use url::Url;

use crate::{FailureKind, FetchError};

/// Object keys under which a page body may carry its job array.
const PAGE_ARRAY_KEYS: &[&str] = &["jobs", "results", "data"];

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Listing endpoint; the page number is added as a query parameter.
    pub base_url: String,
    pub page_param: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/jobs".to_string(),
            page_param: "page".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl ApiSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// URL for page `page`, keeping any other query parameters of the base URL.
    pub fn page_url(&self, page: u32) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| *key != self.page_param)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(&self.page_param, &page.to_string());
        Ok(url)
    }
}

/// Remote source of job pages. Page numbers start at 1.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<JobPage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestJobApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestJobApi {
    pub fn new(settings: ApiSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    async fn download(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl JobApi for ReqwestJobApi {
    async fn fetch_page(&self, page: u32) -> Result<JobPage, FetchError> {
        let url = self.settings.page_url(page)?;
        jobdeck_info!("Fetching job page {} from {}", page, url);

        let body = self.download(url).await?;
        let decoded = decode_page(&body)?;
        jobdeck_debug!(
            "Job page {} decoded: {} of {} entries from {} bytes",
            page,
            decoded.records.len(),
            decoded.raw_len,
            body.len()
        );
        Ok(decoded)
    }
}

/// Decodes a page body into job records.
///
/// The body is either a JSON array of jobs or an object holding that array
/// under `jobs`, `results` or `data`. Elements without a usable `id` are
/// skipped but still counted in `raw_len`; nothing else about a record is
/// checked.
pub fn decode_page(body: &[u8]) -> Result<JobPage, FetchError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => PAGE_ARRAY_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| FetchError::new(FailureKind::Decode, "no job array in response"))?,
        other => {
            return Err(FetchError::new(
                FailureKind::Decode,
                format!("unexpected page body: {}", json_kind(&other)),
            ))
        }
    };

    let total = items.len();
    let records: Vec<JobRecord> = items.into_iter().filter_map(JobRecord::from_value).collect();
    if records.len() != total {
        jobdeck_warn!(
            "Skipped {} job entries without a usable id",
            total - records.len()
        );
    }
    Ok(JobPage::new(records, total))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
