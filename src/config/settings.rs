use anyhow::{Context, Result, anyhow};
use std::{num::NonZeroUsize, path::PathBuf};

use crate::constants::{
    ALLOWED_ORIGIN, BIND_ADDR, FIXTURE_DIR, LOCALES_DIR, PAGE_SIZE, QUERY_API_KEY, QUERY_API_URL,
};

/// Where list records are fetched from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSettings {
    Remote { base_url: String, api_key: String },
    Fixtures { dir: PathBuf },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub source: SourceSettings,
    pub locales_dir: PathBuf,
    pub page_size: NonZeroUsize,
    pub allowed_origin: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let page_size = parse_page_size(&PAGE_SIZE)?;

        let source = match (QUERY_API_URL.as_ref(), QUERY_API_KEY.as_ref()) {
            (Some(url), Some(key)) => SourceSettings::Remote {
                base_url: url.trim_end_matches('/').to_string(),
                api_key: key.clone(),
            },
            (Some(_), None) => {
                return Err(anyhow!("QUERY_API_URL is set but QUERY_API_KEY is missing"));
            }
            _ => SourceSettings::Fixtures {
                dir: PathBuf::from(FIXTURE_DIR.as_str()),
            },
        };

        Ok(Self {
            bind_addr: String::clone(&BIND_ADDR),
            source,
            locales_dir: PathBuf::from(LOCALES_DIR.as_str()),
            page_size,
            allowed_origin: Option::clone(&ALLOWED_ORIGIN),
        })
    }
}

pub fn parse_page_size(raw: &str) -> Result<NonZeroUsize> {
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("PAGE_SIZE must be a positive integer, got '{raw}'"))?;
    NonZeroUsize::new(value).ok_or_else(|| anyhow!("PAGE_SIZE must be at least 1"))
}
