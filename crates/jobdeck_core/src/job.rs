use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable identifier of a job posting.
///
/// The job API hands out either numbers or strings. The value is an opaque
/// key: `Int(7)` and `Text("7")` are different jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Int(i64),
    Text(String),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Int(value) => write!(f, "{value}"),
            JobId::Text(value) => f.write_str(value),
        }
    }
}

impl FromStr for JobId {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Ok(match raw.parse::<i64>() {
            Ok(value) => JobId::Int(value),
            Err(_) => JobId::Text(raw.to_string()),
        })
    }
}

impl From<i64> for JobId {
    fn from(value: i64) -> Self {
        JobId::Int(value)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        JobId::Text(value.to_string())
    }
}

impl From<String> for JobId {
    fn from(value: String) -> Self {
        JobId::Text(value)
    }
}

/// Engagement counters shown on the detail screen. Missing counters are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobStats {
    pub views: u64,
    /// Direct shares plus Facebook shares.
    pub shares: u64,
    pub applications: u64,
}

/// One job posting as delivered by the API.
///
/// Only `id` is interpreted. Every other attribute is kept verbatim in
/// `fields` and serialized back unchanged, so a bookmarked record survives a
/// round trip through storage even if it carries fields this crate has never
/// heard of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl JobRecord {
    pub fn new(id: impl Into<JobId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style helper, mostly for tests and fixtures.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Converts a raw JSON value into a record, or `None` if it is not an
    /// object with a usable `id`.
    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    pub fn title(&self) -> Option<String> {
        self.text("title")
    }

    pub fn company(&self) -> Option<String> {
        self.text("company")
    }

    pub fn location(&self) -> Option<String> {
        self.text("location")
    }

    pub fn salary(&self) -> Option<String> {
        self.text("salary")
    }

    pub fn phone(&self) -> Option<String> {
        self.text("phone")
    }

    pub fn description(&self) -> Option<String> {
        self.text("description")
    }

    pub fn job_type(&self) -> Option<String> {
        self.text("jobType")
    }

    pub fn experience(&self) -> Option<String> {
        self.text("experience")
    }

    pub fn openings(&self) -> Option<String> {
        self.text("openings")
    }

    pub fn fees(&self) -> Option<String> {
        self.text("fees")
    }

    pub fn requirements(&self) -> Option<String> {
        self.text("requirements")
    }

    /// Tag labels. Tags usually arrive as `{"value": .., "bgColor": ..}`
    /// objects; bare strings and numbers are accepted too.
    pub fn tags(&self) -> Vec<String> {
        self.nested(&["additionalInfo", "tags"])
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| match tag {
                        Value::Object(fields) => fields.get("value").and_then(scalar_text),
                        other => scalar_text(other),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `(name, value)` rows of `additionalInfo.contentV3`, in document order.
    /// Entries without a value are skipped; a missing name falls back to the
    /// entry's key.
    pub fn additional_details(&self) -> Vec<(String, String)> {
        let Some(content) = self.nested(&["additionalInfo", "contentV3"]) else {
            return Vec::new();
        };
        let entries: Vec<(Option<&str>, &Value)> = match content {
            Value::Object(map) => map.iter().map(|(key, info)| (Some(key.as_str()), info)).collect(),
            Value::Array(items) => items.iter().map(|info| (None, info)).collect(),
            _ => return Vec::new(),
        };
        entries
            .into_iter()
            .filter_map(|(key, info)| {
                let value = info.get("value").and_then(scalar_text)?;
                let name = info
                    .get("name")
                    .and_then(scalar_text)
                    .or_else(|| key.map(str::to_string))?;
                Some((name, value))
            })
            .collect()
    }

    pub fn stats(&self) -> JobStats {
        JobStats {
            views: self.count(&["additionalInfo", "views"]),
            shares: self.count(&["additionalInfo", "shares"])
                + self.count(&["additionalInfo", "fbShares"]),
            applications: self.count(&["additionalInfo", "applications"]),
        }
    }

    pub fn posted_on(&self) -> Option<NaiveDate> {
        self.fields.get("createdOn").and_then(date_value)
    }

    pub fn expires_on(&self) -> Option<NaiveDate> {
        self.fields.get("expiresOn").and_then(date_value)
    }

    /// Label of the call action: the employer's own button text, or
    /// `Call: <phone>`. `None` when there is no phone number to call.
    pub fn call_label(&self) -> Option<String> {
        let phone = self.phone()?;
        Some(
            self.nested(&["companyDetails", "buttonText"])
                .and_then(scalar_text)
                .unwrap_or_else(|| format!("Call: {phone}")),
        )
    }

    pub fn is_premium(&self) -> bool {
        self.nested(&["additionalInfo", "isPremium"])
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn whatsapp_link(&self) -> Option<String> {
        self.nested(&["companyDetails", "whatsappLink"])
            .and_then(scalar_text)
    }

    /// Hours during which the employer takes calls, as `(start, end)`.
    pub fn call_window(&self) -> Option<(String, String)> {
        let start = self
            .nested(&["companyDetails", "callStartTime"])
            .and_then(scalar_text)?;
        let end = self
            .nested(&["companyDetails", "callEndTime"])
            .and_then(scalar_text)?;
        Some((start, end))
    }

    pub fn image_count(&self) -> usize {
        self.nested(&["media", "images"])
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(scalar_text)
    }

    fn count(&self, path: &[&str]) -> u64 {
        self.nested(path)
            .and_then(|value| match value {
                Value::Number(number) => number.as_u64(),
                Value::String(text) => text.trim().parse().ok(),
                _ => None,
            })
            .unwrap_or(0)
    }

    fn nested(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.fields.get(*first)?, |value, key| value.get(*key))
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Accepts RFC 3339 timestamps, plain `YYYY-MM-DD` dates and epoch milliseconds.
fn date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            DateTime::parse_from_rfc3339(text)
                .map(|stamp| stamp.date_naive())
                .ok()
                .or_else(|| NaiveDate::parse_from_str(text.get(..10)?, "%Y-%m-%d").ok())
        }
        Value::Number(number) => {
            DateTime::<Utc>::from_timestamp_millis(number.as_i64()?).map(|stamp| stamp.date_naive())
        }
        _ => None,
    }
}
