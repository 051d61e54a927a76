//! Facet keyed caches for extracted climate statistics.
//!
//! A cache instance declares an ordered list of facets. Every get, put and
//! delete supplies a value for each declared facet, and the canonicalized
//! values form the storage key. Payloads are JSON, gzipped on disk.

use crate::{coords::GridBox, errors::ClimateStatsErr};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    cell::RefCell,
    collections::HashMap,
    io::{Read, Write},
    path::{Path, PathBuf},
};

/// The file holding the payload for one fully specified facet tuple.
const CACHE_FILE_NAME: &str = "cached.dat";

/// How a facet value is rendered into a storage key segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    /// The text value is used verbatim.
    Plain,
    /// A coordinate, rendered with [`GridBox::coord_key`].
    Coord,
}

/// One declared cache facet.
#[derive(Debug, Clone, Copy)]
pub struct Facet {
    /// The name the facet is supplied under in cache requests.
    pub name: &'static str,
    /// How the facet's values are canonicalized.
    pub kind: FacetKind,
}

/// A value supplied for a facet in a cache request.
#[derive(Debug, Clone, Copy)]
pub enum FacetValue<'a> {
    /// A value for a [`FacetKind::Plain`] facet.
    Text(&'a str),
    /// A value for a [`FacetKind::Coord`] facet.
    Coord(f64),
}

impl Facet {
    fn canonicalize(&self, value: FacetValue) -> Result<String, ClimateStatsErr> {
        match (self.kind, value) {
            (FacetKind::Plain, FacetValue::Text(text)) => Ok(text.to_string()),
            (FacetKind::Coord, FacetValue::Coord(val)) => Ok(GridBox::coord_key(val)),
            _ => Err(ClimateStatsErr::LogicError("facet value does not match facet kind")),
        }
    }
}

/// Storage backend for a cache, keyed by canonicalized segments.
pub trait CacheStore {
    /// Fetch the payload stored under `segments`, if any.
    fn get(&self, segments: &[String]) -> Result<Option<String>, ClimateStatsErr>;

    /// Store `payload` under `segments`, replacing any previous entry.
    ///
    /// An empty payload is rejected with [`ClimateStatsErr::MissingData`]
    /// rather than stored, so a get never returns an empty entry.
    fn put(&self, segments: &[String], payload: &str) -> Result<(), ClimateStatsErr>;

    /// Remove the entry under `segments`. Absent entries are not an error.
    fn delete(&self, segments: &[String]) -> Result<(), ClimateStatsErr>;
}

/// A facet keyed cache over some storage backend.
pub struct StatsCache {
    facets: &'static [Facet],
    store: Box<dyn CacheStore>,
}

impl StatsCache {
    /// Create a cache with the declared facets over a storage backend.
    pub fn new(facets: &'static [Facet], store: Box<dyn CacheStore>) -> Self {
        StatsCache { facets, store }
    }

    /// Fetch and deserialize the entry for the given facet values.
    pub fn get<T>(&self, values: &[(&str, FacetValue)]) -> Result<Option<T>, ClimateStatsErr>
    where
        T: DeserializeOwned,
    {
        let segments = self.segments(values)?;

        match self.store.get(&segments)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store an entry, overwriting any previous one.
    pub fn put<T>(&self, values: &[(&str, FacetValue)], data: &T) -> Result<(), ClimateStatsErr>
    where
        T: Serialize,
    {
        let segments = self.segments(values)?;
        let text = serde_json::to_string(data)?;
        self.store.put(&segments, &text)
    }

    /// Remove the entry for the given facet values if present.
    pub fn delete(&self, values: &[(&str, FacetValue)]) -> Result<(), ClimateStatsErr> {
        let segments = self.segments(values)?;
        self.store.delete(&segments)
    }

    // Map each declared facet through its canonicalizer, in declared order.
    fn segments(&self, values: &[(&str, FacetValue)]) -> Result<Vec<String>, ClimateStatsErr> {
        let mut segments = Vec::with_capacity(self.facets.len());

        for facet in self.facets {
            let value = values
                .iter()
                .find(|(name, _)| *name == facet.name)
                .map(|(_, value)| *value)
                .ok_or(ClimateStatsErr::MissingFacet(facet.name))?;

            segments.push(facet.canonicalize(value)?);
        }

        Ok(segments)
    }
}

/// Cache storage as a directory tree with one gzipped file per entry.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: &dyn AsRef<Path>) -> Result<Self, ClimateStatsErr> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;

        Ok(FsStore { root })
    }

    fn file_path(&self, segments: &[String]) -> PathBuf {
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        path.join(CACHE_FILE_NAME)
    }
}

impl CacheStore for FsStore {
    fn get(&self, segments: &[String]) -> Result<Option<String>, ClimateStatsErr> {
        let fpath = self.file_path(segments);

        if !fpath.is_file() {
            return Ok(None);
        }

        log::info!("Extracting data from cache file: {}", fpath.display());

        let file = std::fs::File::open(fpath)?;
        let mut decoder = flate2::read::GzDecoder::new(file);
        let mut text = String::new();
        decoder.read_to_string(&mut text)?;

        Ok(Some(text))
    }

    fn put(&self, segments: &[String], payload: &str) -> Result<(), ClimateStatsErr> {
        if payload.is_empty() {
            return Err(ClimateStatsErr::MissingData);
        }

        let fpath = self.file_path(segments);

        // create_dir_all treats already existing directories as success, so
        // racing writers do not trip each other up here.
        if let Some(dir) = fpath.parent() {
            std::fs::create_dir_all(dir)?;
        }

        log::info!("Writing cache file: {}", fpath.display());

        let file = std::fs::File::create(fpath)?;
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(payload.as_bytes())?;
        encoder.finish()?;

        Ok(())
    }

    fn delete(&self, segments: &[String]) -> Result<(), ClimateStatsErr> {
        let fpath = self.file_path(segments);
        log::warn!("Deleting cache file: {}", fpath.display());

        if fpath.is_file() {
            std::fs::remove_file(fpath)?;
        }

        Ok(())
    }
}

/// In memory cache storage.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(segments: &[String]) -> String {
        segments.join("/")
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, segments: &[String]) -> Result<Option<String>, ClimateStatsErr> {
        Ok(self.entries.borrow().get(&Self::key(segments)).cloned())
    }

    fn put(&self, segments: &[String], payload: &str) -> Result<(), ClimateStatsErr> {
        if payload.is_empty() {
            return Err(ClimateStatsErr::MissingData);
        }

        self.entries
            .borrow_mut()
            .insert(Self::key(segments), payload.to_string());

        Ok(())
    }

    fn delete(&self, segments: &[String]) -> Result<(), ClimateStatsErr> {
        self.entries.borrow_mut().remove(&Self::key(segments));
        Ok(())
    }
}

/// Cache storage in a single SQLite table.
pub struct SqliteStore {
    db_conn: rusqlite::Connection,
}

impl SqliteStore {
    /// Open the database file, creating it and the cache table if needed.
    pub fn open(db_file: &dyn AsRef<Path>) -> Result<Self, ClimateStatsErr> {
        let db_conn = rusqlite::Connection::open(db_file.as_ref())?;

        db_conn.execute(
            "CREATE TABLE IF NOT EXISTS cache (
                key     TEXT PRIMARY KEY,
                payload TEXT NOT NULL
            )",
            rusqlite::NO_PARAMS,
        )?;

        Ok(SqliteStore { db_conn })
    }

    fn key(segments: &[String]) -> String {
        segments.join("/")
    }
}

impl CacheStore for SqliteStore {
    fn get(&self, segments: &[String]) -> Result<Option<String>, ClimateStatsErr> {
        let key = Self::key(segments);

        let result: Result<String, rusqlite::Error> = self.db_conn.query_row(
            "SELECT payload FROM cache WHERE key = ?1",
            &[&key as &dyn rusqlite::types::ToSql],
            |row| row.get(0),
        );

        match result {
            Ok(payload) => Ok(Some(payload)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(ClimateStatsErr::Database(err)),
        }
    }

    fn put(&self, segments: &[String], payload: &str) -> Result<(), ClimateStatsErr> {
        if payload.is_empty() {
            return Err(ClimateStatsErr::MissingData);
        }

        self.db_conn.execute(
            "INSERT OR REPLACE INTO cache (key, payload) VALUES (?1, ?2)",
            &[&Self::key(segments) as &dyn rusqlite::types::ToSql, &payload],
        )?;

        Ok(())
    }

    fn delete(&self, segments: &[String]) -> Result<(), ClimateStatsErr> {
        self.db_conn.execute(
            "DELETE FROM cache WHERE key = ?1",
            &[&Self::key(segments) as &dyn rusqlite::types::ToSql],
        )?;

        Ok(())
    }
}

/// Facets of the per request summary cache.
pub static STATS_FACETS: &[Facet] = &[
    Facet { name: "domain_type", kind: FacetKind::Plain },
    Facet { name: "experiment", kind: FacetKind::Plain },
    Facet { name: "time_period", kind: FacetKind::Plain },
    Facet { name: "lat", kind: FacetKind::Coord },
    Facet { name: "lon", kind: FacetKind::Coord },
];

/// Facets of the full multi experiment summary cache.
pub static FULL_FACETS: &[Facet] = &[
    Facet { name: "domain_type", kind: FacetKind::Plain },
    Facet { name: "lat", kind: FacetKind::Coord },
    Facet { name: "lon", kind: FacetKind::Coord },
];

/// The cache of per request statistical summaries.
pub fn stats_cache(cache_root: &dyn AsRef<Path>) -> Result<StatsCache, ClimateStatsErr> {
    let store = FsStore::new(&cache_root.as_ref().join("summary"))?;
    Ok(StatsCache::new(STATS_FACETS, Box::new(store)))
}

/// The cache of full multi experiment CSV summaries.
pub fn full_cache(cache_root: &dyn AsRef<Path>) -> Result<StatsCache, ClimateStatsErr> {
    let store = FsStore::new(&cache_root.as_ref().join("full"))?;
    Ok(StatsCache::new(FULL_FACETS, Box::new(store)))
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
