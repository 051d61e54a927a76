//! Reading reference grid axes and point data series from NetCDF files.

use crate::{domains::Timescale, errors::ClimateStatsErr, grid::GridAxes};
use std::path::Path;

static LAT_NAMES: &[&str] = &["lat", "latitude"];
static LON_NAMES: &[&str] = &["lon", "longitude"];

/// Reads the coordinate axes a gridded variable is defined on.
pub trait GridReader {
    /// Read the 1-D latitude and longitude axes from a reference file.
    fn read_axes(&self, path: &Path, variable: &str) -> Result<GridAxes, ClimateStatsErr>;
}

/// Reads the values stored at one grid cell of a data file.
pub trait PointReader {
    /// Read the series for `variable` at the cell nearest (`lat`, `lon`).
    ///
    /// Returns exactly one value per time step at the file's timescale, with
    /// `None` for masked or non-finite cells.
    fn read_point(
        &self,
        path: &Path,
        variable: &str,
        timescale: Timescale,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<Option<f64>>, ClimateStatsErr>;
}

/// `GridReader` over real NetCDF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NcGridReader;

impl GridReader for NcGridReader {
    fn read_axes(&self, path: &Path, variable: &str) -> Result<GridAxes, ClimateStatsErr> {
        let file = netcdf::open(path)?;

        // The reference variable is only checked for presence, the axes are
        // read from the coordinate variables themselves.
        if file.variable(variable).is_none() {
            return Err(ClimateStatsErr::MissingVariable(variable.to_string()));
        }

        let lats = read_coord(&file, LAT_NAMES)?;
        let lons = read_coord(&file, LON_NAMES)?;

        Ok(GridAxes { lats, lons })
    }
}

/// `PointReader` over real NetCDF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NcPointReader;

impl PointReader for NcPointReader {
    fn read_point(
        &self,
        path: &Path,
        variable: &str,
        timescale: Timescale,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<Option<f64>>, ClimateStatsErr> {
        let file = netcdf::open(path)?;

        let var = file
            .variable(variable)
            .ok_or_else(|| ClimateStatsErr::MissingVariable(variable.to_string()))?;

        let lat_axis = read_coord(&file, LAT_NAMES)?;
        let lon_axis = read_coord(&file, LON_NAMES)?;

        let j = crate::grid::nearest_index(lat, &lat_axis)
            .ok_or(ClimateStatsErr::LogicError("empty latitude axis"))?;
        let i = crate::grid::nearest_index(lon, &lon_axis)
            .ok_or(ClimateStatsErr::LogicError("empty longitude axis"))?;

        let num_steps = timescale.num_steps();
        let dims = var.dimensions();

        let (n_time, n_lat, n_lon) = match dims.len() {
            3 => (dims[0].len(), dims[1].len(), dims[2].len()),
            2 => (1, dims[0].len(), dims[1].len()),
            n => {
                return Err(ClimateStatsErr::GeneralError(format!(
                    "expected 2 or 3 dimensions for {}, found {}",
                    variable, n
                )));
            }
        };

        if n_time != num_steps || n_lat != lat_axis.len() || n_lon != lon_axis.len() {
            return Err(ClimateStatsErr::GeneralError(format!(
                "unexpected shape ({}, {}, {}) for {} at timescale {}",
                n_time,
                n_lat,
                n_lon,
                variable,
                timescale.as_static_str()
            )));
        }

        let raw: Vec<f64> = var.get_values(..)?;
        let fill = get_f64_attr(&var, "_FillValue").or_else(|| get_f64_attr(&var, "missing_value"));

        let series = (0..num_steps)
            .map(|t| {
                let value = raw[t * n_lat * n_lon + j * n_lon + i];

                if !value.is_finite() || fill.map(|fv| value == fv).unwrap_or(false) {
                    None
                } else {
                    Some(value)
                }
            })
            .collect();

        Ok(series)
    }
}

/// Read a 1-D coordinate variable, trying the common names in order.
fn read_coord(file: &netcdf::File, names: &[&str]) -> Result<Vec<f64>, ClimateStatsErr> {
    for name in names {
        if let Some(var) = file.variable(name) {
            let data: Vec<f64> = var.get_values(..)?;
            return Ok(data);
        }
    }

    Err(ClimateStatsErr::MissingVariable(names.join(" or ")))
}

fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }

    var.attribute_value(name)
        .and_then(|res| res.ok())
        .and_then(|value| match value {
            netcdf::AttributeValue::Double(d) => Some(d),
            netcdf::AttributeValue::Float(f) => Some(f as f64),
            _ => None,
        })
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use std::path::PathBuf;
    use tempdir::TempDir;

    const FILL: f64 = 1.0e20;

    // Write a small data file with value t*1000 + j*10 + i at each cell and
    // the cell at (1, 1) filled with the missing value marker.
    fn write_test_file(
        path: &PathBuf,
        lats: &[f64],
        lons: &[f64],
        steps: usize,
    ) -> Result<(), ClimateStatsErr> {
        let mut file = netcdf::create(path)?;

        file.add_dimension("time", steps)?;
        file.add_dimension("lat", lats.len())?;
        file.add_dimension("lon", lons.len())?;

        let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
        lat_var.put_values(lats, ..)?;

        let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
        lon_var.put_values(lons, ..)?;

        let mut var = file.add_variable::<f64>("tas", &["time", "lat", "lon"])?;
        var.put_attribute("_FillValue", FILL)?;

        let mut data = Vec::with_capacity(steps * lats.len() * lons.len());
        for t in 0..steps {
            for j in 0..lats.len() {
                for i in 0..lons.len() {
                    if j == 1 && i == 1 {
                        data.push(FILL);
                    } else {
                        data.push((t * 1000 + j * 10 + i) as f64);
                    }
                }
            }
        }
        var.put_values(&data, ..)?;

        Ok(())
    }

    #[test]
    fn test_read_axes() {
        let tmp = TempDir::new("climate-stats-netcdf").expect("tempdir");
        let path = tmp.path().join("ref.nc");

        let lats = vec![-0.5, 0.5, 1.5];
        let lons = vec![10.0, 11.0];
        write_test_file(&path, &lats, &lons, 1).expect("write test file");

        let axes = NcGridReader.read_axes(&path, "tas").expect("read axes");
        assert_eq!(axes.lats, lats);
        assert_eq!(axes.lons, lons);
    }

    #[test]
    fn test_read_axes_missing_variable() {
        let tmp = TempDir::new("climate-stats-netcdf").expect("tempdir");
        let path = tmp.path().join("ref.nc");

        write_test_file(&path, &[0.5], &[10.0], 1).expect("write test file");

        assert!(NcGridReader.read_axes(&path, "pr").is_err());
    }

    #[test]
    fn test_read_point_monthly() {
        let tmp = TempDir::new("climate-stats-netcdf").expect("tempdir");
        let path = tmp.path().join("data.nc");

        let lats = vec![-0.5, 0.5, 1.5];
        let lons = vec![10.0, 11.0];
        write_test_file(&path, &lats, &lons, 12).expect("write test file");

        let series = NcPointReader
            .read_point(&path, "tas", Timescale::Monthly, 1.4, 10.1)
            .expect("read point");

        assert_eq!(series.len(), 12);
        // Cell (2, 0): value t*1000 + 20.
        assert_eq!(series[0], Some(20.0));
        assert_eq!(series[11], Some(11020.0));
    }

    #[test]
    fn test_read_point_fill_value() {
        let tmp = TempDir::new("climate-stats-netcdf").expect("tempdir");
        let path = tmp.path().join("data.nc");

        write_test_file(&path, &[-0.5, 0.5, 1.5], &[10.0, 11.0], 1).expect("write test file");

        // Cell (1, 1) was written with the fill value.
        let series = NcPointReader
            .read_point(&path, "tas", Timescale::Annual, 0.5, 11.0)
            .expect("read point");
        assert_eq!(series, vec![None]);
    }

    #[test]
    fn test_read_point_shape_mismatch() {
        let tmp = TempDir::new("climate-stats-netcdf").expect("tempdir");
        let path = tmp.path().join("data.nc");

        write_test_file(&path, &[-0.5, 0.5, 1.5], &[10.0, 11.0], 12).expect("write test file");

        // An annual read against a twelve step file is refused.
        assert!(NcPointReader
            .read_point(&path, "tas", Timescale::Annual, 0.5, 10.0)
            .is_err());
    }

    #[test]
    fn test_read_point_missing_file() {
        let path = PathBuf::from("no_such_directory/no_such_file.nc");
        assert!(NcPointReader
            .read_point(&path, "tas", Timescale::Annual, 0.0, 0.0)
            .is_err());
    }
}
