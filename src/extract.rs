//! Extraction of climate model statistics at requested locations.

use crate::{
    cache::{self, StatsCache},
    coords::GridBox,
    domains::RegionalDomain,
    errors::ClimateStatsErr,
    location::RequestedLocationView,
    netcdf_io::{NcPointReader, PointReader},
    vocab::Vocabs,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

mod full_summary;
mod point;
mod stats;

pub use point::PointData;

/// The filesystem roots the extractor works against.
#[derive(Debug, Clone)]
pub struct StatsPaths {
    /// Root of the extracted model statistics tree.
    pub data_root: PathBuf,
    /// Directory holding the reference grid files.
    pub grid_ref_dir: PathBuf,
    /// Root of the result caches.
    pub cache_root: PathBuf,
}

impl StatsPaths {
    /// The standard layout under a single root directory.
    pub fn new(root: &dyn AsRef<Path>) -> Self {
        let root = root.as_ref();

        StatsPaths {
            data_root: root.join("data"),
            grid_ref_dir: root.join("grid_ref_files"),
            cache_root: root.join("web_cache"),
        }
    }
}

/// The extraction engine.
pub struct StatsExtractor {
    data_root: PathBuf,      // Root of the extracted model statistics tree.
    cache_stats: StatsCache, // Per request summaries.
    cache_full: StatsCache,  // Full CSV summaries.
    vocabs: Vocabs,
    reader: Box<dyn PointReader>,
}

impl StatsExtractor {
    /// Set up an extractor with filesystem caches and a NetCDF point reader.
    pub fn new(paths: &StatsPaths) -> Result<Self, ClimateStatsErr> {
        Self::with_reader(paths, Box::new(NcPointReader))
    }

    /// Set up an extractor reading point data through `reader`.
    pub fn with_reader(
        paths: &StatsPaths,
        reader: Box<dyn PointReader>,
    ) -> Result<Self, ClimateStatsErr> {
        log::info!("Setting up cache manager.");

        Ok(StatsExtractor {
            data_root: paths.data_root.clone(),
            cache_stats: cache::stats_cache(&paths.cache_root)?,
            cache_full: cache::full_cache(&paths.cache_root)?,
            vocabs: Vocabs::new(),
            reader,
        })
    }

    /// The vocabulary tables this extractor works from.
    pub fn vocabs(&self) -> &Vocabs {
        &self.vocabs
    }
}

/// The full response of a batch extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResponse {
    /// Results at the global grid.
    #[serde(rename = "GlobalData")]
    pub global_data: DomainData,
    /// Results at the regional grids.
    #[serde(rename = "RegionalData")]
    pub regional_data: DomainData,
}

/// The extracted results for one domain type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomainData {
    /// One entry per distinct grid box, in first-request order.
    #[serde(rename = "Locations")]
    pub locations: Vec<LocationResults>,
}

/// One snapped grid location and the results extracted there.
///
/// Several requested locations can share a grid box, so the requested views
/// accumulate while the results are extracted once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationResults {
    /// The grid box the results were extracted at.
    #[serde(rename = "ModelLocation")]
    pub model_location: ModelLocation,
    /// Every requested location that resolved to this grid box.
    #[serde(rename = "RequestedLocations")]
    pub requested_locations: Vec<RequestedLocationView>,
    /// The extracted values, one record per variable, period and statistic.
    #[serde(rename = "Results")]
    pub results: Vec<ResultRecord>,
}

/// The grid box a set of results applies to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelLocation {
    /// The snapped grid latitude.
    #[serde(rename = "Lat")]
    pub lat: f64,
    /// The snapped grid longitude.
    #[serde(rename = "Lon")]
    pub lon: f64,
    /// The first covering regional domain, for regional results.
    #[serde(rename = "RegionalDomain", skip_serializing_if = "Option::is_none")]
    pub regional_domain: Option<RegionalDomain>,
}

/// One `variable:period:statistic` row of values, one value per model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// A `variable:period:statistic` identifier.
    #[serde(rename = "VariableName")]
    pub variable_name: String,
    /// One value per model providing the variable, in model order.
    #[serde(rename = "Values")]
    pub values: Vec<Option<f64>>,
}

// Tracks which (lat, lon, domain label) triples were already handled in one
// extraction call, so repeated grid boxes are computed once.
#[derive(Debug, Default)]
struct ProcessedLocations {
    seen: HashSet<(String, String, String)>,
}

impl ProcessedLocations {
    fn key(grid_box: GridBox, label: &str) -> (String, String, String) {
        (grid_box.lat_key(), grid_box.lon_key(), label.to_string())
    }

    fn is_processed(&self, grid_box: GridBox, label: &str) -> bool {
        self.seen.contains(&Self::key(grid_box, label))
    }

    fn add(&mut self, grid_box: GridBox, label: &str) {
        self.seen.insert(Self::key(grid_box, label));
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
