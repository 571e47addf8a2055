use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{ActivityPage, PageMeta, TargetPage};
use super::{BioactivitySource, ChemblError, RawActivity, TargetSummary};

/// Public ChEMBL REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";

/// Connection settings for the ChEMBL API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemblConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Records requested per page
    pub page_size: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Activity type to download
    pub standard_type: String,
}

impl Default for ChemblConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 1000,
            timeout_secs: 60,
            standard_type: "IC50".to_string(),
        }
    }
}

/// Blocking ChEMBL client
///
/// Requests are never retried. A failed page ends the listing: what was
/// collected so far is returned and the failure is logged at `warn`.
#[derive(Debug, Clone)]
pub struct ChemblClient {
    http: Client,
    config: ChemblConfig,
}

impl ChemblClient {
    /// Build a client
    pub fn new(config: ChemblConfig) -> Result<Self, ChemblError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("pic50/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Settings in use
    pub fn config(&self) -> &ChemblConfig {
        &self.config
    }

    fn endpoint(&self, resource: &str, query: &[(&str, String)]) -> Result<Url, ChemblError> {
        let text = format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource);
        Url::parse_with_params(&text, query).map_err(|e| ChemblError::InvalidUrl {
            url: text,
            reason: e.to_string(),
        })
    }

    fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ChemblError> {
        log::debug!("GET {url}");
        let response = self.http.get(url.clone()).send()?.error_for_status()?;
        Ok(response.json()?)
    }

    /// Follow `page_meta.next` links from `first`, collecting items
    fn collect_pages<P, T>(&self, first: Url, split: impl Fn(P) -> (Vec<T>, PageMeta)) -> Vec<T>
    where
        P: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut next = Some(first);
        while let Some(url) = next.take() {
            let page = match self.get::<P>(&url) {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("Request to {url} failed, keeping {} records: {e}", items.len());
                    break;
                }
            };
            let (mut batch, meta) = split(page);
            if batch.is_empty() {
                break;
            }
            items.append(&mut batch);
            next = match meta.next.as_deref().map(|link| resolve_next(&url, link)) {
                Some(Ok(url)) => Some(url),
                Some(Err(e)) => {
                    log::warn!("{e}");
                    None
                }
                None => None,
            };
        }
        items
    }
}

/// Resolve a `page_meta.next` link, which the API gives as an absolute path
pub(crate) fn resolve_next(current: &Url, link: &str) -> Result<Url, ChemblError> {
    current.join(link).map_err(|e| ChemblError::InvalidUrl {
        url: link.to_string(),
        reason: e.to_string(),
    })
}

impl BioactivitySource for ChemblClient {
    fn search_targets(&self, query: &str) -> Result<Vec<TargetSummary>, ChemblError> {
        let url = self.endpoint(
            "target/search.json",
            &[("q", query.to_string()), ("limit", self.config.page_size.to_string())],
        )?;
        let targets = self.collect_pages(url, |page: TargetPage| (page.targets, page.page_meta));
        if targets.is_empty() {
            log::warn!("Target search for '{query}' returned nothing");
        }
        log::info!("Found {} targets for '{query}'", targets.len());
        Ok(targets)
    }

    fn activities(&self, target_id: &str, standard_type: &str) -> Result<Vec<RawActivity>, ChemblError> {
        let url = self.endpoint(
            "activity.json",
            &[
                ("target_chembl_id", target_id.to_string()),
                ("standard_type", standard_type.to_string()),
                ("limit", self.config.page_size.to_string()),
            ],
        )?;
        let activities = self.collect_pages(url, |page: ActivityPage| (page.activities, page.page_meta));
        log::info!("Downloaded {} {standard_type} activities for {target_id}", activities.len());
        Ok(activities)
    }

    fn count_activities(&self, target_id: &str, standard_type: &str) -> Result<usize, ChemblError> {
        let url = self.endpoint(
            "activity.json",
            &[
                ("target_chembl_id", target_id.to_string()),
                ("standard_type", standard_type.to_string()),
                ("limit", "1".to_string()),
            ],
        )?;
        match self.get::<ActivityPage>(&url) {
            Ok(page) => Ok(page.page_meta.total_count.unwrap_or(page.activities.len())),
            Err(e) => {
                log::warn!("Counting activities for {target_id} failed: {e}");
                Ok(0)
            }
        }
    }
}
