//! Startup data import: the default tour packages plus tours read from a JSON file.

use std::collections::BTreeSet;
use std::path::Path;

use models::tour::{Difficulty, Region};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::catalog::domain::TourInput;
use crate::catalog::{TourPackageService, TourService};
use crate::errors::ServiceError;

/// Packages every deployment starts with, as `(code, name)`.
pub const DEFAULT_PACKAGES: [(&str, &str); 9] = [
    ("BC", "Backpack Cal"),
    ("CC", "California Calm"),
    ("CH", "California Hot springs"),
    ("CY", "Cycle California"),
    ("DS", "From Desert to Sea"),
    ("KC", "Kids California"),
    ("NW", "Nature Watch"),
    ("SC", "Snowboard Cali"),
    ("TC", "Taste of California"),
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("malformed seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("seed record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// One entry of the tour seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourRecord {
    pub package_name: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blurb: String,
    pub price: Price,
    /// Duration, e.g. `"3 days"`.
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub bullets: String,
    #[serde(default)]
    pub keywords: String,
    pub difficulty: String,
    pub region: String,
}

/// Seed files write prices either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(i64),
    Text(String),
}

impl Price {
    fn to_i32(&self) -> Result<i32, String> {
        let n = match self {
            Price::Number(n) => *n,
            Price::Text(s) => s.trim().parse::<i64>().map_err(|_| format!("price is not a number: {s:?}"))?,
        };
        i32::try_from(n).map_err(|_| format!("price out of range: {n}"))
    }
}

impl TourRecord {
    fn into_input(self, index: usize) -> Result<TourInput, SeedError> {
        let invalid = |reason: String| SeedError::InvalidRecord { index, reason };
        let price = self.price.to_i32().map_err(invalid)?;
        let difficulty = self.difficulty.parse::<Difficulty>().map_err(|e| invalid(e.to_string()))?;
        let region = Region::find_by_label(&self.region).map_err(|e| invalid(e.to_string()))?;
        Ok(TourInput {
            package_name: self.package_name,
            title: self.title,
            description: self.description,
            blurb: self.blurb,
            price,
            duration: self.length,
            bullets: self.bullets,
            keywords: self.keywords,
            difficulty,
            region,
        })
    }
}

/// Totals after a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub packages: u64,
    pub tours: u64,
    pub tours_imported: usize,
}

/// Parse a whole seed document, resolving every label before anything is stored.
pub fn parse_tours(json: &str) -> Result<Vec<TourInput>, SeedError> {
    let records: Vec<TourRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_input(i))
        .collect()
}

pub async fn load_tours_file(path: impl AsRef<Path>) -> Result<Vec<TourInput>, SeedError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io { path: path.display().to_string(), source })?;
    parse_tours(&json)
}

pub async fn seed_packages(packages: &TourPackageService) -> Result<(), SeedError> {
    for (code, name) in DEFAULT_PACKAGES {
        packages.create_tour_package(code, name).await?;
    }
    Ok(())
}

/// Create every tour unless the tour table already has rows; returns how many were created.
///
/// Every package name is resolved before the first insert, so an unknown package stores nothing.
pub async fn seed_tours(packages: &TourPackageService, tours: &TourService, inputs: Vec<TourInput>) -> Result<usize, SeedError> {
    if tours.total().await? > 0 {
        info!("tours already present, skipping import");
        return Ok(0);
    }
    let names: BTreeSet<&str> = inputs.iter().map(|i| i.package_name.as_str()).collect();
    for name in names {
        match packages.lookup_by_name(name).await {
            Ok(_) => {}
            Err(ServiceError::NotFound(_)) => return Err(ServiceError::UnknownPackage(name.to_string()).into()),
            Err(e) => return Err(e.into()),
        }
    }
    let n = inputs.len();
    for input in inputs {
        tours.create_tour(input).await?;
    }
    Ok(n)
}

/// Run the startup import described by `cfg`.
#[instrument(skip_all, fields(tours_file = %cfg.tours_file))]
pub async fn run(packages: &TourPackageService, tours: &TourService, cfg: &configs::SeedConfig) -> Result<SeedReport, SeedError> {
    seed_packages(packages).await?;
    let package_total = packages.total().await?;
    info!(total = package_total, "Persisted Packages");

    let mut imported = 0;
    if tours.total().await? == 0 {
        let inputs = load_tours_file(&cfg.tours_file).await?;
        imported = seed_tours(packages, tours, inputs).await?;
    } else {
        warn!("tour table not empty, seed file ignored");
    }
    let tour_total = tours.total().await?;
    info!(total = tour_total, imported, "Persisted Tours");

    Ok(SeedReport { packages: package_total, tours: tour_total, tours_imported: imported })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::mock::{MockTourPackageRepository, MockTourRepository};
    use crate::catalog::repository::{TourPackageRepository, TourRepository};
    use std::sync::Arc;

    const SAMPLE: &str = r#"[
        {"packageName": "Backpack Cal", "title": "Big Sur Retreat", "description": "d", "blurb": "b",
         "price": "750", "length": "3 days", "bullets": "x", "keywords": "k",
         "difficulty": "Medium", "region": "Central Coast"},
        {"packageName": "Taste of California", "title": "Wine Country", "description": "d", "blurb": "b",
         "price": 300, "length": "1 day", "bullets": "y", "keywords": "wine",
         "difficulty": "Easy", "region": "Northern California"}
    ]"#;

    fn services() -> (TourPackageService, TourService) {
        let packages: Arc<dyn TourPackageRepository> = Arc::new(MockTourPackageRepository::default());
        let tours: Arc<dyn TourRepository> = Arc::new(MockTourRepository::default());
        (TourPackageService::new(packages.clone()), TourService::new(packages, tours))
    }

    #[test]
    fn parses_numeric_and_string_prices() {
        let inputs = parse_tours(SAMPLE).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].price, 750);
        assert_eq!(inputs[0].duration, "3 days");
        assert_eq!(inputs[0].difficulty, Difficulty::Medium);
        assert_eq!(inputs[1].price, 300);
        assert_eq!(inputs[1].region, Region::NorthernCalifornia);
    }

    #[test]
    fn unknown_region_names_the_record() {
        let json = r#"[{"packageName": "Nature Watch", "title": "t", "price": 1, "difficulty": "Easy", "region": "Nevada"}]"#;
        let err = parse_tours(json).unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { index: 0, .. }), "got {err:?}");
    }

    #[test]
    fn bad_difficulty_and_price_are_rejected() {
        let bad_difficulty = r#"[{"packageName": "p", "title": "t", "price": 1, "difficulty": "Extreme", "region": "Varies"}]"#;
        let bad_price = r#"[{"packageName": "p", "title": "t", "price": "cheap", "difficulty": "Easy", "region": "Varies"}]"#;
        assert!(matches!(parse_tours(bad_difficulty), Err(SeedError::InvalidRecord { .. })));
        assert!(matches!(parse_tours(bad_price), Err(SeedError::InvalidRecord { .. })));
        assert!(matches!(parse_tours("{not json"), Err(SeedError::Parse(_))));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = load_tours_file("definitely/not/here.json").await.unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[tokio::test]
    async fn seeds_packages_and_tours_once() {
        let (packages, tours) = services();
        let path = std::env::temp_dir().join(format!("explore_cali_seed_{}.json", std::process::id()));
        tokio::fs::write(&path, SAMPLE).await.unwrap();
        let cfg = configs::SeedConfig { enabled: true, tours_file: path.display().to_string() };

        let first = run(&packages, &tours, &cfg).await.unwrap();
        assert_eq!(first, SeedReport { packages: 9, tours: 2, tours_imported: 2 });
        assert_eq!(tours.lookup_by_package("TC").await.unwrap().len(), 1);

        let second = run(&packages, &tours, &cfg).await.unwrap();
        assert_eq!(second, SeedReport { packages: 9, tours: 2, tours_imported: 0 });
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn tour_in_unknown_package_fails_import() {
        let (packages, tours) = services();
        seed_packages(&packages).await.unwrap();
        let inputs = parse_tours(
            r#"[{"packageName": "Nature Watch", "title": "Owls", "price": 1, "difficulty": "Easy", "region": "Varies"},
                {"packageName": "Surf Camp", "title": "t", "price": 1, "difficulty": "Easy", "region": "Varies"},
                {"packageName": "Kids California", "title": "Zoo", "price": 1, "difficulty": "Easy", "region": "Varies"}]"#,
        )
        .unwrap();
        let err = seed_tours(&packages, &tours, inputs).await.unwrap_err();
        assert!(matches!(err, SeedError::Service(ServiceError::UnknownPackage(ref name)) if name == "Surf Camp"));
        assert_eq!(tours.total().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_import_is_retried_on_next_run() {
        let (packages, tours) = services();
        let path = std::env::temp_dir().join(format!("explore_cali_seed_retry_{}.json", std::process::id()));
        let bad = SAMPLE.replacen("Taste of California", "Surf Camp", 1);
        tokio::fs::write(&path, bad).await.unwrap();
        let cfg = configs::SeedConfig { enabled: true, tours_file: path.display().to_string() };

        assert!(run(&packages, &tours, &cfg).await.is_err());
        assert_eq!(tours.total().await.unwrap(), 0);

        tokio::fs::write(&path, SAMPLE).await.unwrap();
        let report = run(&packages, &tours, &cfg).await.unwrap();
        assert_eq!(report.tours_imported, 2);
        let _ = tokio::fs::remove_file(&path).await;
    }
}
