//! Module for errors.
use std::{error::Error, fmt::Display};

/// Error from the climate statistics interface.
#[derive(Debug)]
pub enum ClimateStatsErr {
    // Inherited errors from std
    /// Error forwarded from std
    IO(::std::io::Error),

    // Other forwarded errors
    /// Error forwarded from the netcdf crate
    NetCdf(netcdf::Error),
    /// Database error
    Database(::rusqlite::Error),
    /// Error serializing or deserializing a cache payload
    Serde(::serde_json::Error),
    /// Error forwarded from the strum crate
    StrumError(strum::ParseError),
    /// Invalid glob pattern built for a data file lookup
    GlobPattern(::glob::PatternError),
    /// General error with any cause information erased and replaced by a string
    GeneralError(String),

    // My own errors from this crate
    /// A location string was not "<asset_id>,<lat>,<lon>".
    BadLocationFormat(String),
    /// Latitude outside [-90, 90].
    LatitudeOutOfRange(f64),
    /// Longitude outside [-360, 360].
    LongitudeOutOfRange(f64),
    /// A cache call left out one of the declared facets.
    MissingFacet(&'static str),
    /// A cache put was attempted with no payload.
    MissingData,
    /// More than one data file matched a lookup pattern.
    AmbiguousFilePattern {
        /// The glob pattern that was searched.
        pattern: String,
        /// How many files matched it.
        count: usize,
    },
    /// A NetCDF file did not contain an expected variable.
    MissingVariable(String),
    /// There was an internal logic error.
    LogicError(&'static str),
}

impl Display for ClimateStatsErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::ClimateStatsErr::*;

        match self {
            IO(err) => write!(f, "std lib io error: {}", err),

            NetCdf(err) => write!(f, "error from netcdf crate: {}", err),
            Database(err) => write!(f, "database error: {}", err),
            Serde(err) => write!(f, "serialization error: {}", err),
            StrumError(err) => write!(f, "error forwarded from strum crate: {}", err),
            GlobPattern(err) => write!(f, "invalid file lookup pattern: {}", err),
            GeneralError(msg) => write!(f, "general error forwarded: {}", msg),

            BadLocationFormat(loc) => write!(f, "location is not valid: {}", loc),
            LatitudeOutOfRange(lat) => write!(f, "latitude out of range: {}", lat),
            LongitudeOutOfRange(lon) => write!(f, "longitude out of range: {}", lon),
            MissingFacet(facet) => write!(f, "cache key missing facet: {}", facet),
            MissingData => write!(f, "no data provided for cache entry"),
            AmbiguousFilePattern { pattern, count } => {
                write!(f, "{} files matched pattern {}, expected one", count, pattern)
            }
            MissingVariable(name) => write!(f, "variable not found in file: {}", name),
            LogicError(msg) => write!(f, "internal logic error: {}", msg),
        }
    }
}

impl Error for ClimateStatsErr {}

impl From<::std::io::Error> for ClimateStatsErr {
    fn from(err: ::std::io::Error) -> ClimateStatsErr {
        ClimateStatsErr::IO(err)
    }
}

impl From<netcdf::Error> for ClimateStatsErr {
    fn from(err: netcdf::Error) -> ClimateStatsErr {
        ClimateStatsErr::NetCdf(err)
    }
}

impl From<::rusqlite::Error> for ClimateStatsErr {
    fn from(err: ::rusqlite::Error) -> ClimateStatsErr {
        ClimateStatsErr::Database(err)
    }
}

impl From<::serde_json::Error> for ClimateStatsErr {
    fn from(err: ::serde_json::Error) -> ClimateStatsErr {
        ClimateStatsErr::Serde(err)
    }
}

impl From<strum::ParseError> for ClimateStatsErr {
    fn from(err: strum::ParseError) -> ClimateStatsErr {
        ClimateStatsErr::StrumError(err)
    }
}

impl From<::glob::PatternError> for ClimateStatsErr {
    fn from(err: ::glob::PatternError) -> ClimateStatsErr {
        ClimateStatsErr::GlobPattern(err)
    }
}

impl From<Box<dyn Error>> for ClimateStatsErr {
    fn from(err: Box<dyn Error>) -> ClimateStatsErr {
        ClimateStatsErr::GeneralError(err.to_string())
    }
}
