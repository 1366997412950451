use anyhow::{Context, Result, anyhow};
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::{path::PathBuf, time::Duration};

use crate::config::settings::SourceSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub enum RecordSource {
    /// Hosted REST query API in front of the relational database.
    Remote {
        client: Client,
        base_url: String,
        api_key: String,
    },
    /// `<dir>/<table>.json`, each holding a JSON array of rows.
    Fixtures { dir: PathBuf },
}

/// Read-only access to raw table rows. Rows are returned untyped so that a
/// single malformed row can be rejected without losing the rest.
pub struct RecordRepository {
    pub source: RecordSource,
}

impl RecordRepository {
    pub fn new(settings: &SourceSettings) -> Result<Self> {
        let source = match settings {
            SourceSettings::Remote { base_url, api_key } => RecordSource::Remote {
                client: Client::builder()
                    .timeout(REQUEST_TIMEOUT)
                    .build()
                    .context("Failed to build HTTP client")?,
                base_url: base_url.clone(),
                api_key: api_key.clone(),
            },
            SourceSettings::Fixtures { dir } => RecordSource::Fixtures { dir: dir.clone() },
        };
        Ok(Self { source })
    }

    pub fn from_fixtures(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: RecordSource::Fixtures { dir: dir.into() },
        }
    }

    pub async fn fetch_rows(&self, table: &str, select: &str) -> Result<Vec<Value>> {
        match &self.source {
            RecordSource::Remote {
                client,
                base_url,
                api_key,
            } => {
                let url = format!("{base_url}/rest/v1/{table}");
                debug!("Fetching rows from {}", url);

                client
                    .get(&url)
                    .query(&[("select", select)])
                    .header("apikey", api_key)
                    .bearer_auth(api_key)
                    .send()
                    .await
                    .with_context(|| format!("Request to '{table}' failed"))?
                    .error_for_status()
                    .with_context(|| format!("Query API rejected request for '{table}'"))?
                    .json::<Vec<Value>>()
                    .await
                    .with_context(|| format!("Response for '{table}' is not a JSON array"))
            }
            RecordSource::Fixtures { dir } => {
                let path = dir.join(format!("{table}.json"));
                debug!("Reading rows from {:?}", path);

                let content = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read fixture {:?}", path))?;
                match serde_json::from_str::<Value>(&content)
                    .with_context(|| format!("Fixture {:?} is not valid JSON", path))?
                {
                    Value::Array(rows) => Ok(rows),
                    _ => Err(anyhow!("Fixture {:?} must contain a JSON array", path)),
                }
            }
        }
    }
}
