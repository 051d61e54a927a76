#![deny(missing_docs)]
//! Package to locate the climate model grid boxes nearest to asset
//! locations and to extract and cache model statistics at those grid boxes.

//
// Public API
//
pub use crate::cache::{
    full_cache, stats_cache, CacheStore, Facet, FacetKind, FacetValue, FsStore, MemoryStore,
    SqliteStore, StatsCache,
};
pub use crate::cmd_line::CommonCmdLineArgs;
pub use crate::coords::{Coords, GridBox};
pub use crate::domains::{
    DomainType, Experiment, MeaningPeriod, RegionalDomain, TimePeriod, Timescale,
};
pub use crate::errors::ClimateStatsErr;
pub use crate::extract::{
    DomainData, ExtractionResponse, LocationResults, ModelLocation, PointData, ResultRecord,
    StatsExtractor, StatsPaths,
};
pub use crate::grid::{nearest_grid_box, GridAxes};
pub use crate::location::{Location, RequestedLocation, RequestedLocationView};
pub use crate::netcdf_io::{GridReader, NcGridReader, NcPointReader, PointReader};
pub use crate::reference::ReferenceGrids;
pub use crate::vocab::{Statistic, Variable, Vocabs};

//
// Implementation only
//
mod cache;
mod cmd_line;
mod coords;
mod domains;
mod errors;
mod extract;
mod grid;
mod location;
mod netcdf_io;
mod reference;
mod vocab;
