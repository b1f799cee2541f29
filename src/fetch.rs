//! Remote rule list retrieval.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{PacError, Result};
use crate::parser::parse_remote;
use crate::ruleset::RuleSet;

/// Supplies raw rule document text for a URL
pub trait RuleSource: Send + Sync {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// Downloads rule lists over HTTP(S)
#[derive(Debug, Clone, Default)]
pub struct HttpSource;

impl HttpSource {
    pub fn new() -> Self {
        Self
    }
}

impl RuleSource for HttpSource {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String> {
        let fetch_err = |message: String| PacError::Fetch {
            url: url.to_string(),
            message,
        };

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        let mut response = agent
            .get(url)
            .call()
            .map_err(|e| fetch_err(format!("Download failed: {}", e)))?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| fetch_err(format!("Invalid response body: {}", e)))
    }
}

/// Source that never has anything, used when downloads are skipped
#[derive(Debug, Clone, Default)]
pub struct NilSource;

impl RuleSource for NilSource {
    fn fetch(&self, url: &str, _timeout: Duration) -> Result<String> {
        Err(PacError::Fetch {
            url: url.to_string(),
            message: "downloads disabled".to_string(),
        })
    }
}

/// In-memory source for testing
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, url: &str, text: impl Into<String>) {
        self.documents.insert(url.to_string(), text.into());
    }

    pub fn with(mut self, url: &str, text: impl Into<String>) -> Self {
        self.add(url, text);
        self
    }
}

impl RuleSource for MemorySource {
    fn fetch(&self, url: &str, _timeout: Duration) -> Result<String> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| PacError::Fetch {
                url: url.to_string(),
                message: "not found".to_string(),
            })
    }
}

/// Fetch and parse a remote rule list.
///
/// Any failure degrades to an empty rule set so the run can continue.
pub fn load_remote(source: &dyn RuleSource, url: &str, timeout: Duration) -> RuleSet {
    info!("Downloading rule list from {}", url);
    match source.fetch(url, timeout) {
        Ok(text) => {
            let set = parse_remote(&text);
            info!(
                "Loaded {} rules ({} suffix, {} exact) from {}",
                set.len(),
                set.suffixes().len(),
                set.exacts().len(),
                url
            );
            set
        }
        Err(e) => {
            warn!("{}, continuing with an empty list", e);
            RuleSet::new()
        }
    }
}
