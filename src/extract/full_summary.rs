//! The full multi experiment summary, rendered as CSV.

use crate::{
    cache::FacetValue,
    domains::{DomainType, Experiment, TimePeriod},
    errors::ClimateStatsErr,
    location::Location,
};
use strum::IntoEnumIterator;

use super::StatsExtractor;

const CSV_HEADER: &str = "Time Period,Experiment,Model,Model Type,Variable,Statistic,Units,\
                          Grid Box Lat,Grid Box Lon,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,\
                          Nov,Dec,Ann";

/// The token written in place of a missing value.
const MISSING_VALUE: &str = "NaN";

impl StatsExtractor {
    /// Build the full summary CSV for one location, covering every time
    /// period, experiment, model, variable and statistic combination valid
    /// for the location's domain memberships.
    pub fn extract_full_summary_csv(&self, location: &Location) -> Result<String, ClimateStatsErr> {
        let mut csv = String::from(CSV_HEADER);
        csv.push('\n');

        for domain_type in &[DomainType::Global, DomainType::Regional] {
            for line in self.full_summary_lines(*domain_type, location)? {
                csv.push_str(&line);
                csv.push('\n');
            }
        }

        Ok(csv)
    }

    // The CSV data lines for one domain type, cached per grid box. The full
    // cache key carries no experiment or time period because the lines
    // enumerate all of them.
    fn full_summary_lines(
        &self,
        domain_type: DomainType,
        location: &Location,
    ) -> Result<Vec<String>, ClimateStatsErr> {
        let cache_box = match domain_type {
            DomainType::Global => location.global_grid_box(),
            DomainType::Regional => match location.first_regional() {
                Some((_, grid_box)) => grid_box,
                None => return Ok(Vec::new()),
            },
        };

        let facet_values = [
            ("domain_type", FacetValue::Text(domain_type.as_static_str())),
            ("lat", FacetValue::Coord(cache_box.lat)),
            ("lon", FacetValue::Coord(cache_box.lon)),
        ];

        if let Some(lines) = self.cache_full.get::<Vec<String>>(&facet_values)? {
            return Ok(lines);
        }

        let mut lines = Vec::new();

        for time_period in TimePeriod::iter() {
            for experiment in Experiment::iter() {
                for inst_model in self.vocabs.all_models(domain_type) {
                    for variable in self.vocabs.variable_list(domain_type, inst_model) {
                        for statistic in self.vocabs.stats_list(variable) {
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
                                *statistic,
                                location,
                            )?;

                            // A regional model whose domain does not cover
                            // the location contributes no rows.
                            let grid_box = match point_data.grid_box {
                                Some(grid_box) => grid_box,
                                None => continue,
                            };

                            // Coordinates keep their decimal point even when
                            // whole, so 320.0 renders as "320.0".
                            let mut line = format!(
                                "{},{},{},{},{},{},{},{:?},{:?}",
                                time_period,
                                experiment,
                                inst_model,
                                domain_type,
                                variable.display_name(),
                                statistic,
                                variable.units(),
                                grid_box.lat,
                                grid_box.lon,
                            );

                            for value in &point_data.values {
                                line.push(',');
                                match value {
                                    Some(value) => line.push_str(&format!("{:.2}", value)),
                                    None => line.push_str(MISSING_VALUE),
                                }
                            }

                            lines.push(line);
                        }
                    }
                }
            }
        }

        self.cache_full.put(&facet_values, &lines)?;

        Ok(lines)
    }
}
