//! Domain types and the small request vocabulary enums.

use serde::{Serialize, Serializer};
use std::fmt;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// The two kinds of model grids data is extracted from.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum DomainType {
    /// The single world-covering CMIP5 grid.
    Global,
    /// The CORDEX-44 domains, five partially overlapping regional grids.
    Regional,
}

impl DomainType {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// The directory name used for this domain type under the data root.
    pub fn dir_component(self) -> &'static str {
        match self {
            DomainType::Global => "global",
            DomainType::Regional => "regional",
        }
    }

    /// The resolution directory name for data files of this domain type.
    pub fn resolution_component(self) -> &'static str {
        match self {
            DomainType::Global => "1_deg",
            DomainType::Regional => "0.5_deg",
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_static_str())
    }
}

/// The CORDEX-44 regional domains, in the fixed order used everywhere a
/// location's covering domains are listed or searched.
#[derive(
    Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumString, IntoStaticStr, EnumIter,
)]
pub enum RegionalDomain {
    /// Africa
    #[strum(to_string = "AFR-44")]
    Afr44,
    /// Arctic
    #[strum(to_string = "ARC-44")]
    Arc44,
    /// Europe
    #[strum(to_string = "EUR-44")]
    Eur44,
    /// Middle East and North Africa
    #[strum(to_string = "MNA-44")]
    Mna44,
    /// North America
    #[strum(to_string = "NAM-44")]
    Nam44,
}

impl RegionalDomain {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// File name of the reference grid file for this domain.
    pub fn ref_file_name(self) -> String {
        format!("tas_{}i.nc", self.as_static_str())
    }

    /// Parse the domain out of a regional model id such as
    /// "ICHEC-EC-EARTH/EUR-44".
    pub fn from_inst_model(inst_model: &str) -> Option<Self> {
        use std::str::FromStr;

        inst_model
            .split('/')
            .nth(1)
            .and_then(|code| Self::from_str(code).ok())
    }
}

impl fmt::Display for RegionalDomain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_static_str())
    }
}

impl Serialize for RegionalDomain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_static_str())
    }
}

/// The emissions scenarios data is available for.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum Experiment {
    #[allow(missing_docs)]
    #[strum(to_string = "rcp45")]
    Rcp45,
    #[allow(missing_docs)]
    #[strum(to_string = "rcp85")]
    Rcp85,
}

impl Experiment {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_static_str())
    }
}

/// The central years of the meaned future periods data is available for.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum TimePeriod {
    #[allow(missing_docs)]
    #[strum(to_string = "2035")]
    Y2035,
    #[allow(missing_docs)]
    #[strum(to_string = "2055")]
    Y2055,
}

impl TimePeriod {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_static_str())
    }
}

/// The thirteen meaning periods every statistic is extracted for, in the
/// order values are reported.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
#[allow(missing_docs)]
pub enum MeaningPeriod {
    #[strum(to_string = "jan")]
    Jan,
    #[strum(to_string = "feb")]
    Feb,
    #[strum(to_string = "mar")]
    Mar,
    #[strum(to_string = "apr")]
    Apr,
    #[strum(to_string = "may")]
    May,
    #[strum(to_string = "jun")]
    Jun,
    #[strum(to_string = "jul")]
    Jul,
    #[strum(to_string = "aug")]
    Aug,
    #[strum(to_string = "sep")]
    Sep,
    #[strum(to_string = "oct")]
    Oct,
    #[strum(to_string = "nov")]
    Nov,
    #[strum(to_string = "dec")]
    Dec,
    #[strum(to_string = "ann")]
    Ann,
}

impl MeaningPeriod {
    /// The number of meaning periods, twelve months plus the annual mean.
    pub const COUNT: usize = 13;

    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// The column header used for this period in CSV output.
    pub fn column_header(self) -> &'static str {
        use MeaningPeriod::*;

        match self {
            Jan => "Jan",
            Feb => "Feb",
            Mar => "Mar",
            Apr => "Apr",
            May => "May",
            Jun => "Jun",
            Jul => "Jul",
            Aug => "Aug",
            Sep => "Sep",
            Oct => "Oct",
            Nov => "Nov",
            Dec => "Dec",
            Ann => "Ann",
        }
    }

    /// Which file timescale this period's value is stored at.
    pub fn timescale(self) -> Timescale {
        match self {
            MeaningPeriod::Ann => Timescale::Annual,
            _ => Timescale::Monthly,
        }
    }
}

impl fmt::Display for MeaningPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_static_str())
    }
}

/// The two file granularities data files are meaned to.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum Timescale {
    /// Twelve values per file, January through December.
    #[strum(to_string = "mon")]
    Monthly,
    /// One value per file.
    #[strum(to_string = "ann")]
    Annual,
}

impl Timescale {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// How many time steps a file at this timescale holds.
    pub fn num_steps(self) -> usize {
        match self {
            Timescale::Monthly => 12,
            Timescale::Annual => 1,
        }
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_to_string_for_regional_domain() {
        assert_eq!(RegionalDomain::Afr44.as_static_str(), "AFR-44");
        assert_eq!(RegionalDomain::Nam44.as_static_str(), "NAM-44");
    }

    #[test]
    fn test_from_string_for_regional_domain() {
        assert_eq!(
            RegionalDomain::from_str("EUR-44").unwrap(),
            RegionalDomain::Eur44
        );
        assert!(RegionalDomain::from_str("SAM-44").is_err());
    }

    #[test]
    fn round_trip_strings_for_enums() {
        for domain in RegionalDomain::iter() {
            assert_eq!(
                RegionalDomain::from_str(domain.as_static_str()).unwrap(),
                domain
            );
        }

        for experiment in Experiment::iter() {
            assert_eq!(
                Experiment::from_str(experiment.as_static_str()).unwrap(),
                experiment
            );
        }

        for time_period in TimePeriod::iter() {
            assert_eq!(
                TimePeriod::from_str(time_period.as_static_str()).unwrap(),
                time_period
            );
        }
    }

    #[test]
    fn test_regional_domain_order() {
        let domains: Vec<_> = RegionalDomain::iter().collect();
        assert_eq!(
            domains,
            vec![
                RegionalDomain::Afr44,
                RegionalDomain::Arc44,
                RegionalDomain::Eur44,
                RegionalDomain::Mna44,
                RegionalDomain::Nam44,
            ]
        );

        let mut sorted = domains.clone();
        sorted.sort();
        assert_eq!(sorted, domains);
    }

    #[test]
    fn test_ref_file_names() {
        assert_eq!(RegionalDomain::Afr44.ref_file_name(), "tas_AFR-44i.nc");
        assert_eq!(RegionalDomain::Eur44.ref_file_name(), "tas_EUR-44i.nc");
    }

    #[test]
    fn test_from_inst_model() {
        assert_eq!(
            RegionalDomain::from_inst_model("ICHEC-EC-EARTH/ARC-44"),
            Some(RegionalDomain::Arc44)
        );
        assert_eq!(RegionalDomain::from_inst_model("BCC/bcc-csm1-1-m"), None);
        assert_eq!(RegionalDomain::from_inst_model("no-slash"), None);
    }

    #[test]
    fn test_dir_components() {
        assert_eq!(DomainType::Global.dir_component(), "global");
        assert_eq!(DomainType::Regional.dir_component(), "regional");
        assert_eq!(DomainType::Global.resolution_component(), "1_deg");
        assert_eq!(DomainType::Regional.resolution_component(), "0.5_deg");
    }

    #[test]
    fn test_meaning_periods() {
        let periods: Vec<_> = MeaningPeriod::iter().collect();
        assert_eq!(periods.len(), 13);
        assert_eq!(periods[0], MeaningPeriod::Jan);
        assert_eq!(periods[12], MeaningPeriod::Ann);

        assert_eq!(MeaningPeriod::Jan.timescale(), Timescale::Monthly);
        assert_eq!(MeaningPeriod::Ann.timescale(), Timescale::Annual);

        assert_eq!(Timescale::Monthly.num_steps(), 12);
        assert_eq!(Timescale::Annual.num_steps(), 1);
    }
}
