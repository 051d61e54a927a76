//! Locating and reading the data file for one model, variable and statistic.

use crate::{
    coords::GridBox,
    domains::{DomainType, Experiment, MeaningPeriod, RegionalDomain, TimePeriod, Timescale},
    errors::ClimateStatsErr,
    location::Location,
    vocab::{Statistic, Variable},
};
use std::path::{Path, PathBuf};

use super::StatsExtractor;

/// The values extracted for one model, variable and statistic at a point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointData {
    /// One value per meaning period, January through December then annual.
    pub values: Vec<Option<f64>>,
    /// The grid box the values were read at, or `None` when the model's
    /// domain does not cover the location.
    pub grid_box: Option<GridBox>,
}

impl StatsExtractor {
    /// Extract the thirteen meaning period values for one model, variable
    /// and statistic at a location.
    ///
    /// A regional model whose domain does not cover the location yields all
    /// missing values without touching the filesystem. Missing or unreadable
    /// data files degrade to missing values for the affected timescale.
    pub fn extract_data_at_point(
        &self,
        domain_type: DomainType,
        inst_model: &str,
        experiment: Experiment,
        time_period: TimePeriod,
        variable: Variable,
        statistic: Statistic,
        location: &Location,
    ) -> Result<PointData, ClimateStatsErr> {
        let grid_box = match domain_type {
            DomainType::Global => location.global_grid_box(),
            DomainType::Regional => {
                let domain = RegionalDomain::from_inst_model(inst_model).ok_or(
                    ClimateStatsErr::LogicError("regional model id does not name a domain"),
                )?;

                match location.regional_grid_box(domain) {
                    Some(grid_box) => grid_box,
                    None => {
                        return Ok(PointData {
                            values: vec![None; MeaningPeriod::COUNT],
                            grid_box: None,
                        });
                    }
                }
            }
        };

        let dir = self.data_dir(domain_type, experiment, time_period, inst_model, variable);

        let mut values = Vec::with_capacity(MeaningPeriod::COUNT);
        for timescale in &[Timescale::Monthly, Timescale::Annual] {
            values.extend(self.read_series(
                &dir, variable, statistic, *timescale, experiment, grid_box,
            )?);
        }

        Ok(PointData {
            values,
            grid_box: Some(grid_box),
        })
    }

    // The directory one model's statistics files for a variable live in.
    fn data_dir(
        &self,
        domain_type: DomainType,
        experiment: Experiment,
        time_period: TimePeriod,
        inst_model: &str,
        variable: Variable,
    ) -> PathBuf {
        self.data_root
            .join(domain_type.dir_component())
            .join(variable.as_static_str())
            .join(experiment.as_static_str())
            .join(inst_model)
            .join(time_period.as_static_str())
            .join(domain_type.resolution_component())
    }

    // Read the series at one timescale, finding the data file by pattern.
    fn read_series(
        &self,
        dir: &Path,
        variable: Variable,
        statistic: Statistic,
        timescale: Timescale,
        experiment: Experiment,
        grid_box: GridBox,
    ) -> Result<Vec<Option<f64>>, ClimateStatsErr> {
        let num_steps = timescale.num_steps();

        let file_name = format!(
            "{}_*_{}_*r*_{}_{}_change.nc",
            variable.as_static_str(),
            experiment.as_static_str(),
            timescale.as_static_str(),
            statistic.as_static_str(),
        );
        let pattern = dir.join(file_name).to_string_lossy().into_owned();

        let matches: Vec<PathBuf> = glob::glob(&pattern)?.filter_map(Result::ok).collect();

        let path = match matches.len() {
            1 => &matches[0],
            0 => {
                log::warn!("No data file matched pattern: {}", pattern);
                return Ok(vec![None; num_steps]);
            }
            count => {
                return Err(ClimateStatsErr::AmbiguousFilePattern { pattern, count });
            }
        };

        log::info!("Reading data from: {}", path.display());

        match self.reader.read_point(
            path,
            variable.as_static_str(),
            timescale,
            grid_box.lat,
            grid_box.lon,
        ) {
            Ok(series) => Ok(series),
            Err(err) => {
                log::warn!(
                    "Cannot extract variable '{}' from {} at ({}, {}): {}",
                    variable,
                    path.display(),
                    grid_box.lat,
                    grid_box.lon,
                    err
                );
                Ok(vec![None; num_steps])
            }
        }
    }
}
