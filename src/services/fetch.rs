use crate::domain::models::PackageInfo;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

const REQUEST_TIMEOUT_MS: u64 = 3000;
const MAX_CONCURRENCY: usize = 8;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("network error for {name}: {source}")]
    Network {
        name: String,
        source: reqwest::Error,
    },
    #[error("unexpected registry payload for {name}: {source}")]
    Parse {
        name: String,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct RegistryDocument {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "dist-tags", default)]
    dist_tags: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct DownloadsPoint {
    downloads: u64,
}

pub struct PackageClient {
    client: reqwest::blocking::Client,
    registry: String,
    downloads_api: String,
}

impl PackageClient {
    pub fn new(registry: &str, downloads_api: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()?;
        Ok(Self {
            client,
            registry: registry.trim_end_matches('/').to_string(),
            downloads_api: downloads_api.trim_end_matches('/').to_string(),
        })
    }

    /// Retrieves and parses one package's registry page, then a best-effort
    /// download count. A downloads miss degrades to `None` with a notice;
    /// a registry miss fails the whole package.
    pub fn fetch(&self, name: &str) -> Result<PackageInfo, FetchError> {
        let url = format!("{}/{}", self.registry, name);
        let body = self.get_text(name, &url)?;
        let doc: RegistryDocument =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse {
                name: name.to_string(),
                source: e,
            })?;

        let monthly_downloads = match self.fetch_downloads(name) {
            Ok(count) => Some(count),
            Err(e) => {
                eprintln!("notice: no download count for {}: {}", name, e);
                None
            }
        };

        Ok(PackageInfo {
            name: doc.name,
            version: doc.dist_tags.get("latest").cloned(),
            description: doc.description,
            monthly_downloads,
            fetched_at: Some(chrono::Utc::now().to_rfc3339()),
        })
    }

    fn fetch_downloads(&self, name: &str) -> Result<u64, FetchError> {
        let url = format!("{}/{}", self.downloads_api, name);
        let body = self.get_text(name, &url)?;
        let point: DownloadsPoint =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse {
                name: name.to_string(),
                source: e,
            })?;
        Ok(point.downloads)
    }

    fn get_text(&self, name: &str, url: &str) -> Result<String, FetchError> {
        let net_err = |e: reqwest::Error| FetchError::Network {
            name: name.to_string(),
            source: e,
        };
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(net_err)?;
        resp.text().map_err(net_err)
    }
}

/// Fetches every package through a small worker pool. Results come back in
/// input order, one slot per package, and all requests settle before this
/// returns; a failure for one package never disturbs the others.
pub fn fetch_all(
    client: &PackageClient,
    names: &[String],
    concurrency: usize,
) -> Vec<(String, Result<PackageInfo, FetchError>)> {
    if names.is_empty() {
        return Vec::new();
    }
    let workers = concurrency.clamp(1, MAX_CONCURRENCY).min(names.len());
    let next = AtomicUsize::new(0);
    let slots: Mutex<Vec<Option<(String, Result<PackageInfo, FetchError>)>>> =
        Mutex::new((0..names.len()).map(|_| None).collect());

    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let i = next.fetch_add(1, Ordering::SeqCst);
                if i >= names.len() {
                    break;
                }
                let result = client.fetch(&names[i]);
                slots.lock().expect("fetch slots poisoned")[i] =
                    Some((names[i].clone(), result));
            });
        }
    });

    slots
        .into_inner()
        .expect("fetch slots poisoned")
        .into_iter()
        .flatten()
        .collect()
}
