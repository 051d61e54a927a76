//! The batch extraction of the vital statistics for a set of locations.

use crate::{
    cache::FacetValue,
    coords::GridBox,
    domains::{DomainType, Experiment, MeaningPeriod, TimePeriod},
    errors::ClimateStatsErr,
    location::Location,
};
use strum::IntoEnumIterator;

use super::{
    DomainData, ExtractionResponse, LocationResults, ModelLocation, ProcessedLocations,
    ResultRecord, StatsExtractor,
};

impl StatsExtractor {
    /// Extract the vital statistics for every location, at the global grid
    /// and at the regional grids.
    ///
    /// Locations resolving to the same grid box are computed once and listed
    /// together under that grid box. Results are served from the stats cache
    /// when a previous request already computed them.
    pub fn extract_data(
        &self,
        experiment: Experiment,
        time_period: TimePeriod,
        locations: &[Location],
    ) -> Result<ExtractionResponse, ClimateStatsErr> {
        let mut processed = ProcessedLocations::default();

        let global_data =
            self.extract_domain(DomainType::Global, experiment, time_period, locations, &mut processed)?;
        let regional_data =
            self.extract_domain(DomainType::Regional, experiment, time_period, locations, &mut processed)?;

        Ok(ExtractionResponse {
            global_data,
            regional_data,
        })
    }

    fn extract_domain(
        &self,
        domain_type: DomainType,
        experiment: Experiment,
        time_period: TimePeriod,
        locations: &[Location],
        processed: &mut ProcessedLocations,
    ) -> Result<DomainData, ClimateStatsErr> {
        let mut domain_data = DomainData::default();

        for location in locations {
            let (grid_box, regional_domain) = match domain_type {
                DomainType::Global => (location.global_grid_box(), None),
                DomainType::Regional => match location.first_regional() {
                    Some((domain, grid_box)) => (grid_box, Some(domain)),
                    // No regional domain covers this location, so it makes
                    // no regional contribution at all.
                    None => continue,
                },
            };

            let label = match regional_domain {
                Some(domain) => domain.as_static_str(),
                None => domain_type.as_static_str(),
            };

            if processed.is_processed(grid_box, label) {
                merge_requested_location(&mut domain_data, grid_box, location)?;
                continue;
            }

            let facet_values = [
                ("domain_type", FacetValue::Text(domain_type.as_static_str())),
                ("experiment", FacetValue::Text(experiment.as_static_str())),
                ("time_period", FacetValue::Text(time_period.as_static_str())),
                ("lat", FacetValue::Coord(grid_box.lat)),
                ("lon", FacetValue::Coord(grid_box.lon)),
            ];

            let results = match self.cache_stats.get::<Vec<ResultRecord>>(&facet_values)? {
                Some(results) => results,
                None => {
                    let results =
                        self.compute_results(domain_type, experiment, time_period, location)?;
                    self.cache_stats.put(&facet_values, &results)?;
                    results
                }
            };

            processed.add(grid_box, label);
            domain_data.locations.push(LocationResults {
                model_location: ModelLocation {
                    lat: grid_box.lat,
                    lon: grid_box.lon,
                    regional_domain,
                },
                requested_locations: vec![location.requested().view()],
                results,
            });
        }

        Ok(domain_data)
    }

    // Extract every vital variable and statistic pair for every providing
    // model, one record per variable, meaning period and statistic.
    fn compute_results(
        &self,
        domain_type: DomainType,
        experiment: Experiment,
        time_period: TimePeriod,
        location: &Location,
    ) -> Result<Vec<ResultRecord>, ClimateStatsErr> {
        let mut records = Vec::new();

        for (variable, statistic) in self.vocabs.statistic_ids(domain_type) {
            let inst_models = self.vocabs.model_list(domain_type, variable);

            let mut model_series = Vec::with_capacity(inst_models.len());
            for inst_model in inst_models {
                log::info!(
                    "Extracting data for: {}, {}, {}, {}, {}, {}, {}",
                    domain_type,
                    inst_model,
                    experiment,
                    time_period,
                    variable,
                    statistic,
                    location
                );

                let point_data = self.extract_data_at_point(
                    domain_type,
                    inst_model,
                    experiment,
                    time_period,
                    variable,
                    statistic,
                    location,
                )?;
                model_series.push(point_data.values);
            }

            for (i, meaning_period) in MeaningPeriod::iter().enumerate() {
                records.push(ResultRecord {
                    variable_name: format!("{}:{}:{}", variable, meaning_period, statistic),
                    values: model_series
                        .iter()
                        .map(|series| series.get(i).copied().flatten())
                        .collect(),
                });
            }
        }

        Ok(records)
    }
}

// Record an already computed grid box as also answering for `location`.
fn merge_requested_location(
    domain_data: &mut DomainData,
    grid_box: GridBox,
    location: &Location,
) -> Result<(), ClimateStatsErr> {
    for entry in &mut domain_data.locations {
        let entry_box = GridBox {
            lat: entry.model_location.lat,
            lon: entry.model_location.lon,
        };

        if entry_box.lat_key() == grid_box.lat_key() && entry_box.lon_key() == grid_box.lon_key() {
            entry.requested_locations.push(location.requested().view());
            return Ok(());
        }
    }

    // The grid box was marked processed but never indexed, which can only
    // happen through a bookkeeping bug.
    Err(ClimateStatsErr::LogicError(
        "processed grid box missing from the results list",
    ))
}
