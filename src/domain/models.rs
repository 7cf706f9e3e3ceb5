use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// One package's parsed remote data, as persisted in the monthly
/// statistics file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PackageInfo {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub monthly_downloads: Option<u64>,
    #[serde(default)]
    pub fetched_at: Option<String>,
}

/// Per-period statistics document. `packages` is deliberately not
/// `#[serde(default)]`: a period file without it is corrupt, not empty.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct StatsDocument {
    pub packages: Vec<PackageInfo>,
}

#[derive(Serialize)]
pub struct PackageReport {
    pub name: String,
    pub status: String,
    pub version: Option<String>,
    pub monthly_downloads: Option<u64>,
}
