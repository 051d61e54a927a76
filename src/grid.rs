//! Nearest grid box resolution against reference grid axes.

use crate::{
    coords::{Coords, GridBox},
    domains::DomainType,
};

/// The coordinate axes of one reference grid, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxes {
    /// Latitude axis values, ascending.
    pub lats: Vec<f64>,
    /// Longitude axis values, ascending.
    pub lons: Vec<f64>,
}

/// Find the nearest grid box to a requested point, or `None` when the grid
/// does not cover it.
///
/// Longitudes are tried as given and then shifted by 360 degrees once, so a
/// request on a -180..180 convention matches a grid on a 0..360 convention
/// and vice versa. Global grids get a special seam band near the 0/360
/// boundary and cover every latitude. Regional grids reject latitudes
/// outside their axis range.
pub fn nearest_grid_box(
    coords: Coords,
    axes: &GridAxes,
    domain_type: DomainType,
) -> Option<GridBox> {
    let lon = normalize_longitude(coords.lon, &axes.lons, domain_type)?;

    if domain_type == DomainType::Regional {
        let (min_lat, max_lat) = axis_bounds(&axes.lats)?;
        if coords.lat > max_lat || coords.lat < min_lat {
            return None;
        }
    }

    let glat = snap_to_axis(coords.lat, &axes.lats)?;
    let glon = snap_to_axis(lon, &axes.lons)?;

    Some(GridBox {
        lat: glat,
        lon: glon,
    })
}

/// Bring a longitude into the range of the axis, or `None` if no single
/// 360 degree shift gets it there.
fn normalize_longitude(lon: f64, axis: &[f64], domain_type: DomainType) -> Option<f64> {
    // Wrap-around band at the longitude seam, global grids only. The bands
    // are tested in this order so exactly 359.0 maps to 0.
    if domain_type == DomainType::Global {
        if (lon > -1.0 && lon < -0.5) || (lon > 359.0 && lon < 359.5) {
            return Some(359.0);
        } else if (lon >= -0.5 && lon < 0.0) || (lon >= 359.0 && lon < 360.0) {
            return Some(0.0);
        }
    }

    let (min_lon, max_lon) = axis_bounds(axis)?;

    if lon >= min_lon && lon <= max_lon {
        return Some(lon);
    }

    // The axis may be defined as -360 to 0 or 0 to 360, shift once and retry.
    let shifted = if lon < 0.0 {
        lon + 360.0
    } else if lon > 0.0 {
        lon - 360.0
    } else {
        lon
    };

    if shifted >= min_lon && shifted <= max_lon {
        return Some(shifted);
    }

    None
}

/// The index of the axis value nearest to `target`. Ties keep the earlier
/// index, so the lower value wins on an ascending axis.
pub(crate) fn nearest_index(target: f64, axis: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, &value) in axis.iter().enumerate() {
        let dist = (target - value).abs();

        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }

    best.map(|(i, _)| i)
}

fn snap_to_axis(target: f64, axis: &[f64]) -> Option<f64> {
    nearest_index(target, axis).map(|i| axis[i])
}

fn axis_bounds(axis: &[f64]) -> Option<(f64, f64)> {
    let first = *axis.first()?;

    let (mut min, mut max) = (first, first);
    for &value in axis {
        min = min.min(value);
        max = max.max(value);
    }

    Some((min, max))
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    // A one degree global grid with latitude centers on the half degree.
    fn global_axes() -> GridAxes {
        let lats = (0..180).map(|i| -89.5 + i as f64).collect();
        let lons = (0..360).map(|i| i as f64).collect();
        GridAxes { lats, lons }
    }

    // A small regional grid with quarter degree centers.
    fn regional_axes() -> GridAxes {
        let lats = (0..161).map(|i| 25.25 + i as f64 * 0.25).collect();
        let lons = (0..241).map(|i| -30.0 + i as f64 * 0.25).collect();
        GridAxes { lats, lons }
    }

    #[test]
    fn test_global_snap() {
        let axes = global_axes();

        let gb = nearest_grid_box(Coords::from((46.2, 2.7)), &axes, DomainType::Global).unwrap();
        assert_eq!(gb, GridBox::from((46.5, 3.0)));

        let gb = nearest_grid_box(Coords::from((-33.8, 151.2)), &axes, DomainType::Global).unwrap();
        assert_eq!(gb, GridBox::from((-33.5, 151.0)));
    }

    #[test]
    fn test_snap_ties_take_first_axis_value() {
        let axes = global_axes();

        // 46.0 is equidistant from 45.5 and 46.5, the earlier axis value wins.
        let gb = nearest_grid_box(Coords::from((46.0, 10.5)), &axes, DomainType::Global).unwrap();
        assert_eq!(gb.lat, 45.5);
        assert_eq!(gb.lon, 10.0);
    }

    #[test]
    fn test_seam_bands() {
        let axes = global_axes();

        for &(lon, expected) in &[
            (-0.7, 359.0),
            (-0.3, 0.0),
            (-0.5, 0.0),
            (359.0, 0.0),
            (359.4, 359.0),
            (359.8, 0.0),
        ] {
            let gb = nearest_grid_box(Coords::from((0.5, lon)), &axes, DomainType::Global).unwrap();
            assert_eq!(gb.lon, expected, "lon {} snapped to {}", lon, gb.lon);
        }
    }

    #[test]
    fn test_wrap_once() {
        let axes = global_axes();

        // Outside the seam bands a negative longitude shifts up by 360.
        let gb = nearest_grid_box(Coords::from((0.5, -2.0)), &axes, DomainType::Global).unwrap();
        assert_eq!(gb.lon, 358.0);

        let gb = nearest_grid_box(Coords::from((0.5, -179.9)), &axes, DomainType::Global).unwrap();
        assert_eq!(gb.lon, 180.0);
    }

    #[test]
    fn test_equivalent_longitudes_share_a_grid_box() {
        let axes = global_axes();

        let a = nearest_grid_box(Coords::from((10.0, -0.3)), &axes, DomainType::Global).unwrap();
        let b = nearest_grid_box(Coords::from((10.0, 359.7)), &axes, DomainType::Global).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_regional_latitude_bounds() {
        let axes = regional_axes();

        assert!(nearest_grid_box(Coords::from((10.0, 5.0)), &axes, DomainType::Regional).is_none());
        assert!(nearest_grid_box(Coords::from((80.0, 5.0)), &axes, DomainType::Regional).is_none());
        assert!(nearest_grid_box(Coords::from((50.0, 5.0)), &axes, DomainType::Regional).is_some());
    }

    #[test]
    fn test_regional_longitude_out_of_range() {
        let axes = regional_axes();

        // 100E is outside -30..30 even after shifting by 360.
        assert!(
            nearest_grid_box(Coords::from((50.0, 100.0)), &axes, DomainType::Regional).is_none()
        );

        // -350 shifts to 10 which is covered.
        let gb = nearest_grid_box(Coords::from((50.0, -350.0)), &axes, DomainType::Regional)
            .unwrap();
        assert_eq!(gb.lon, 10.0);
    }

    #[test]
    fn test_snapped_values_come_from_the_axes() {
        let axes = regional_axes();

        for &(lat, lon) in &[(42.1, -12.3), (60.9, 29.99), (25.3, -29.9)] {
            let gb = nearest_grid_box(Coords::from((lat, lon)), &axes, DomainType::Regional)
                .unwrap();
            assert!(axes.lats.contains(&gb.lat));
            assert!(axes.lons.contains(&gb.lon));
        }
    }

    #[test]
    fn test_nearest_index() {
        let axis = [0.0, 0.5, 1.0, 1.5];

        assert_eq!(nearest_index(0.6, &axis), Some(1));
        assert_eq!(nearest_index(-5.0, &axis), Some(0));
        assert_eq!(nearest_index(9.0, &axis), Some(3));
        assert_eq!(nearest_index(0.25, &axis), Some(0));
        assert_eq!(nearest_index(0.25, &[]), None);
    }
}
