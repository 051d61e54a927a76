//! The catalog of reference grids locations are snapped to.

use crate::{
    domains::RegionalDomain,
    errors::ClimateStatsErr,
    grid::GridAxes,
    netcdf_io::GridReader,
};
use std::{collections::BTreeMap, path::Path};
use strum::IntoEnumIterator;

/// The variable every reference file is keyed on.
const REF_VARIABLE: &str = "tas";

/// The file holding the global reference grid.
const GLOBAL_REF_FILE: &str = "tas_global.nc";

/// The coordinate axes of the global grid and each regional domain.
#[derive(Debug)]
pub struct ReferenceGrids {
    global: GridAxes,
    regional: BTreeMap<RegionalDomain, GridAxes>,
}

impl ReferenceGrids {
    /// Load all reference grids from the files in `dir`.
    pub fn load(dir: &dyn AsRef<Path>, reader: &dyn GridReader) -> Result<Self, ClimateStatsErr> {
        let dir = dir.as_ref();

        let global = reader.read_axes(&dir.join(GLOBAL_REF_FILE), REF_VARIABLE)?;

        let mut regional = BTreeMap::new();
        for domain in RegionalDomain::iter() {
            let axes = reader.read_axes(&dir.join(domain.ref_file_name()), REF_VARIABLE)?;
            regional.insert(domain, axes);
        }

        Ok(ReferenceGrids { global, regional })
    }

    /// Build a catalog directly from axes.
    pub fn from_axes(global: GridAxes, regional: BTreeMap<RegionalDomain, GridAxes>) -> Self {
        ReferenceGrids { global, regional }
    }

    /// The global grid axes.
    pub fn global(&self) -> &GridAxes {
        &self.global
    }

    /// The axes for one regional domain.
    pub fn regional(&self, domain: RegionalDomain) -> Result<&GridAxes, ClimateStatsErr> {
        self.regional
            .get(&domain)
            .ok_or(ClimateStatsErr::LogicError("regional domain missing from catalog"))
    }

    /// All regional domains with their axes, in domain order.
    pub fn regional_iter(&self) -> impl Iterator<Item = (RegionalDomain, &GridAxes)> {
        self.regional.iter().map(|(domain, axes)| (*domain, axes))
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use crate::netcdf_io::NcGridReader;
    use tempdir::TempDir;

    fn write_ref_file(path: &Path, lats: &[f64], lons: &[f64]) -> Result<(), ClimateStatsErr> {
        let mut file = netcdf::create(path)?;

        file.add_dimension("lat", lats.len())?;
        file.add_dimension("lon", lons.len())?;

        let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
        lat_var.put_values(lats, ..)?;

        let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
        lon_var.put_values(lons, ..)?;

        let mut var = file.add_variable::<f64>("tas", &["lat", "lon"])?;
        let data = vec![0.0; lats.len() * lons.len()];
        var.put_values(&data, ..)?;

        Ok(())
    }

    #[test]
    fn test_load_reference_grids() {
        let tmp = TempDir::new("climate-stats-reference").expect("tempdir");

        let global_lats: Vec<f64> = (0..5).map(|j| -89.5 + j as f64).collect();
        let global_lons: Vec<f64> = (0..4).map(|i| i as f64).collect();
        write_ref_file(&tmp.path().join("tas_global.nc"), &global_lats, &global_lons)
            .expect("write global");

        for domain in RegionalDomain::iter() {
            let lats: Vec<f64> = (0..3).map(|j| 30.25 + 0.25 * j as f64).collect();
            let lons: Vec<f64> = (0..3).map(|i| -10.0 + 0.25 * i as f64).collect();
            write_ref_file(&tmp.path().join(domain.ref_file_name()), &lats, &lons)
                .expect("write regional");
        }

        let grids = ReferenceGrids::load(&tmp.path(), &NcGridReader).expect("load grids");

        assert_eq!(grids.global().lats, global_lats);
        assert_eq!(grids.global().lons, global_lons);
        assert_eq!(grids.regional_iter().count(), 5);

        let eur = grids.regional(RegionalDomain::Eur44).expect("EUR-44 axes");
        assert_eq!(eur.lats.len(), 3);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let tmp = TempDir::new("climate-stats-reference").expect("tempdir");

        write_ref_file(&tmp.path().join("tas_global.nc"), &[0.5], &[10.0]).expect("write global");

        // No regional files were written.
        assert!(ReferenceGrids::load(&tmp.path(), &NcGridReader).is_err());
    }
}
