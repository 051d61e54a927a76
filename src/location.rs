//! Caller supplied asset locations and their mapping onto model grids.

use crate::{
    coords::{Coords, GridBox},
    domains::{DomainType, RegionalDomain},
    errors::ClimateStatsErr,
    grid,
    reference::ReferenceGrids,
};
use serde::Serialize;
use std::{collections::BTreeMap, fmt, str::FromStr};

/// An asset location parsed from a `"<asset_id>,<lat>,<lon>"` string.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestedLocation {
    id: String,
    coords: Coords,
}

impl RequestedLocation {
    /// The asset id given by the caller.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The requested coordinates, before any grid snapping.
    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// The view of this location echoed back in responses.
    pub fn view(&self) -> RequestedLocationView {
        RequestedLocationView {
            id: self.id.clone(),
            lat: self.coords.lat,
            lon: self.coords.lon,
        }
    }
}

impl FromStr for RequestedLocation {
    type Err = ClimateStatsErr;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.matches(',').count() != 2 {
            return Err(ClimateStatsErr::BadLocationFormat(text.to_string()));
        }

        let items: Vec<&str> = text.trim().split(',').collect();

        let lat: f64 = items[1]
            .parse()
            .map_err(|_| ClimateStatsErr::BadLocationFormat(text.to_string()))?;
        let lon: f64 = items[2]
            .parse()
            .map_err(|_| ClimateStatsErr::BadLocationFormat(text.to_string()))?;

        if lat < -90.0 || lat > 90.0 {
            return Err(ClimateStatsErr::LatitudeOutOfRange(lat));
        }

        if lon < -360.0 || lon > 360.0 {
            return Err(ClimateStatsErr::LongitudeOutOfRange(lon));
        }

        Ok(RequestedLocation {
            id: items[0].to_string(),
            coords: Coords { lat, lon },
        })
    }
}

impl fmt::Display for RequestedLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}) [{}]", self.coords.lat, self.coords.lon, self.id)
    }
}

/// The requested, unsnapped location as serialized in responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestedLocationView {
    /// The asset id given by the caller.
    #[serde(rename = "Id")]
    pub id: String,
    /// The requested latitude.
    #[serde(rename = "Lat")]
    pub lat: f64,
    /// The requested longitude.
    #[serde(rename = "Lon")]
    pub lon: f64,
}

/// A requested location resolved against the global and regional grids.
///
/// The global grid covers every valid point. Regional coverage is optional,
/// and a point near a domain boundary may fall inside several domains at
/// once, so every covering domain is kept.
#[derive(Debug, Clone)]
pub struct Location {
    requested: RequestedLocation,
    global_grid_box: GridBox,
    regional_grid_boxes: BTreeMap<RegionalDomain, GridBox>,
}

impl Location {
    /// Parse a `"<asset_id>,<lat>,<lon>"` string and resolve it.
    pub fn new(text: &str, grids: &ReferenceGrids) -> Result<Self, ClimateStatsErr> {
        let requested: RequestedLocation = text.parse()?;
        Self::resolve(requested, grids)
    }

    /// Resolve an already parsed location against every reference grid.
    pub fn resolve(
        requested: RequestedLocation,
        grids: &ReferenceGrids,
    ) -> Result<Self, ClimateStatsErr> {
        let global_grid_box =
            grid::nearest_grid_box(requested.coords(), grids.global(), DomainType::Global)
                .ok_or_else(|| {
                    ClimateStatsErr::GeneralError(format!(
                        "location not on the global grid: {}",
                        requested
                    ))
                })?;

        let mut regional_grid_boxes = BTreeMap::new();
        for (domain, axes) in grids.regional_iter() {
            let snapped = grid::nearest_grid_box(requested.coords(), axes, DomainType::Regional);

            if let Some(grid_box) = snapped {
                regional_grid_boxes.insert(domain, grid_box);
            }
        }

        Ok(Location {
            requested,
            global_grid_box,
            regional_grid_boxes,
        })
    }

    /// The location as the caller requested it.
    pub fn requested(&self) -> &RequestedLocation {
        &self.requested
    }

    /// The nearest box on the global grid.
    pub fn global_grid_box(&self) -> GridBox {
        self.global_grid_box
    }

    /// The nearest box on one regional domain's grid, if the domain covers
    /// this location.
    pub fn regional_grid_box(&self, domain: RegionalDomain) -> Option<GridBox> {
        self.regional_grid_boxes.get(&domain).copied()
    }

    /// The first covering regional domain and its box, in domain order.
    pub fn first_regional(&self) -> Option<(RegionalDomain, GridBox)> {
        self.regional_grid_boxes
            .iter()
            .next()
            .map(|(domain, grid_box)| (*domain, *grid_box))
    }

    /// Whether any regional domain covers this location.
    pub fn has_regional_coverage(&self) -> bool {
        !self.regional_grid_boxes.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.requested)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::grid::GridAxes;

    #[test]
    fn test_parse_valid_location() {
        let loc: RequestedLocation = "BrentA,61.034917,1.705389".parse().unwrap();
        assert_eq!(loc.id(), "BrentA");
        assert_eq!(loc.coords().lat, 61.034917);
        assert_eq!(loc.coords().lon, 1.705389);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let loc: RequestedLocation = " 6500,31.01,26.61 \n".parse().unwrap();
        assert_eq!(loc.id(), "6500");
    }

    #[test]
    fn test_parse_wrong_field_count() {
        assert!(matches!(
            "abc,45.0".parse::<RequestedLocation>(),
            Err(ClimateStatsErr::BadLocationFormat(_))
        ));
        assert!(matches!(
            "abc,45.0,10.0,extra".parse::<RequestedLocation>(),
            Err(ClimateStatsErr::BadLocationFormat(_))
        ));
    }

    #[test]
    fn test_parse_non_numeric_coordinates() {
        assert!(matches!(
            "abc,north,10.0".parse::<RequestedLocation>(),
            Err(ClimateStatsErr::BadLocationFormat(_))
        ));
        assert!(matches!(
            "abc,45.0,east".parse::<RequestedLocation>(),
            Err(ClimateStatsErr::BadLocationFormat(_))
        ));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(
            "abc,91.0,10.0".parse::<RequestedLocation>(),
            Err(ClimateStatsErr::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            "abc,45.0,-360.5".parse::<RequestedLocation>(),
            Err(ClimateStatsErr::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_range_edges_are_valid() {
        assert!("a,-90.0,-360.0".parse::<RequestedLocation>().is_ok());
        assert!("a,90.0,360.0".parse::<RequestedLocation>().is_ok());
    }

    #[test]
    fn test_view_serialization() {
        let loc: RequestedLocation = "rig7,46.0,2.5".parse().unwrap();
        let json = serde_json::to_value(loc.view()).unwrap();

        assert_eq!(json["Id"], "rig7");
        assert_eq!(json["Lat"], 46.0);
        assert_eq!(json["Lon"], 2.5);
    }

    fn test_grids() -> ReferenceGrids {
        let global = GridAxes {
            lats: (0..180).map(|j| -89.5 + j as f64).collect(),
            lons: (0..360).map(|i| i as f64).collect(),
        };

        // EUR-44 spans mid latitudes, AFR-44 the tropics, overlapping around
        // 30 degrees north.
        let eur = GridAxes {
            lats: (0..81).map(|j| 25.0 + 0.5 * j as f64).collect(),
            lons: (0..141).map(|i| -30.0 + 0.5 * i as f64).collect(),
        };
        let afr = GridAxes {
            lats: (0..141).map(|j| -35.0 + 0.5 * j as f64).collect(),
            lons: (0..141).map(|i| -30.0 + 0.5 * i as f64).collect(),
        };

        let mut regional = BTreeMap::new();
        regional.insert(RegionalDomain::Eur44, eur);
        regional.insert(RegionalDomain::Afr44, afr);

        ReferenceGrids::from_axes(global, regional)
    }

    #[test]
    fn test_resolve_keeps_every_covering_domain() {
        let grids = test_grids();

        // 30 degrees north is inside both AFR-44 and EUR-44.
        let loc = Location::new("overlap,30.1,2.6", &grids).unwrap();

        assert!(loc.regional_grid_box(RegionalDomain::Afr44).is_some());
        assert!(loc.regional_grid_box(RegionalDomain::Eur44).is_some());
        assert!(loc.has_regional_coverage());

        // AFR-44 sorts before EUR-44.
        let (first, grid_box) = loc.first_regional().unwrap();
        assert_eq!(first, RegionalDomain::Afr44);
        assert_eq!(grid_box, GridBox::from((30.0, 2.5)));
    }

    #[test]
    fn test_resolve_single_domain() {
        let grids = test_grids();

        let loc = Location::new("paris,48.85,2.35", &grids).unwrap();

        assert!(loc.regional_grid_box(RegionalDomain::Eur44).is_some());
        assert!(loc.regional_grid_box(RegionalDomain::Afr44).is_none());
        assert_eq!(loc.first_regional().unwrap().0, RegionalDomain::Eur44);
    }

    #[test]
    fn test_resolve_no_regional_coverage() {
        let grids = test_grids();

        let loc = Location::new("campos,-21.21,-39.74", &grids).unwrap();

        assert!(!loc.has_regional_coverage());
        assert!(loc.first_regional().is_none());
        assert_eq!(loc.global_grid_box(), GridBox::from((-21.5, 320.0)));
    }

    #[test]
    fn test_resolve_always_finds_a_global_box() {
        let grids = test_grids();

        let loc = Location::new("spitsbergen,78.5,15.6", &grids).unwrap();
        assert_eq!(loc.global_grid_box(), GridBox::from((78.5, 16.0)));
    }
}
