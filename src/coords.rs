//! Latitude and longitude coordinates, requested and grid-snapped.

/// The latitude and longitude of a requested point, as given by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    /// Latitude in degrees north.
    pub lat: f64,
    /// Longitude in degrees east.
    pub lon: f64,
}

impl From<(f64, f64)> for Coords {
    fn from(pair: (f64, f64)) -> Self {
        Self {
            lat: pair.0,
            lon: pair.1,
        }
    }
}

/// A point that is guaranteed to lie on the axes of some reference grid.
///
/// Values are only ever produced by snapping a `Coords` to a grid, so a
/// `GridBox` always holds coordinates present in that grid's axis arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBox {
    /// A latitude value present in the grid's latitude axis.
    pub lat: f64,
    /// A longitude value present in the grid's longitude axis.
    pub lon: f64,
}

impl From<(f64, f64)> for GridBox {
    fn from(pair: (f64, f64)) -> Self {
        Self {
            lat: pair.0,
            lon: pair.1,
        }
    }
}

impl GridBox {
    /// Render a coordinate as a fixed 4-decimal, filesystem safe string.
    ///
    /// The minus sign becomes `m` so the value can be used as a directory
    /// name. Distinct coordinates at grid resolutions stay distinct.
    pub fn coord_key(value: f64) -> String {
        format!("{:.4}", value).replace('-', "m")
    }

    /// The canonical key string for the latitude.
    pub fn lat_key(&self) -> String {
        Self::coord_key(self.lat)
    }

    /// The canonical key string for the longitude.
    pub fn lon_key(&self) -> String {
        Self::coord_key(self.lon)
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_coord_key_formatting() {
        assert_eq!(GridBox::coord_key(46.5), "46.5000");
        assert_eq!(GridBox::coord_key(-0.25), "m0.2500");
        assert_eq!(GridBox::coord_key(359.0), "359.0000");
        assert_eq!(GridBox::coord_key(-89.75), "m89.7500");
    }

    #[test]
    fn test_coord_key_distinct_at_grid_resolution() {
        let vals = [-0.25, 0.0, 0.25, 0.3125, 46.5, -46.5, 359.0];
        for (i, a) in vals.iter().enumerate() {
            for (j, b) in vals.iter().enumerate() {
                if i != j {
                    assert_ne!(GridBox::coord_key(*a), GridBox::coord_key(*b));
                }
            }
        }
    }
}
