//! The static vocabulary of variables, models and statistics.

use crate::domains::DomainType;
use std::fmt;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// The climate variables statistics are published for.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum Variable {
    /// Daily mean near-surface air temperature.
    #[strum(to_string = "tas")]
    Tas,
    /// Daily maximum near-surface air temperature.
    #[strum(to_string = "tasmax")]
    Tasmax,
    /// Daily minimum near-surface air temperature.
    #[strum(to_string = "tasmin")]
    Tasmin,
    /// Daily precipitation.
    #[strum(to_string = "pr")]
    Pr,
    /// Daily sea level pressure.
    #[strum(to_string = "psl")]
    Psl,
    /// Daily near-surface specific humidity.
    #[strum(to_string = "huss")]
    Huss,
    /// Daily near-surface wind speed.
    #[strum(to_string = "sfcWind")]
    SfcWind,
    /// Daily maximum near-surface wind speed.
    #[strum(to_string = "sfcWindmax")]
    SfcWindmax,
    /// Daily sea surface temperature.
    #[strum(to_string = "tos")]
    Tos,
    /// Daily near-surface wind direction.
    #[strum(to_string = "sfcWindDir")]
    SfcWindDir,
    /// Monthly sea surface height above geoid.
    #[strum(to_string = "zos")]
    Zos,
}

impl Variable {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// The human readable name used in CSV output.
    pub fn display_name(self) -> &'static str {
        use Variable::*;

        match self {
            Tas => "Temperature: daily mean",
            Tasmax => "Temperature: daily max",
            Tasmin => "Temperature: daily min",
            Pr => "Rainfall: daily",
            Psl => "Surface pressure: daily",
            Huss => "Humidity: daily",
            SfcWind => "Wind speed: daily",
            SfcWindmax => "Wind speed: daily max",
            Tos => "Sea temperature: daily",
            SfcWindDir => "Wind direction: daily",
            Zos => "Sea Surface Height Above Geoid: monthly",
        }
    }

    /// The units the change values are published in.
    pub fn units(self) -> &'static str {
        use Variable::*;

        match self {
            Tas | Tasmax | Tasmin | Tos => "degC",
            Pr | Huss => "%",
            Psl => "hPa",
            SfcWind | SfcWindmax => "m/s",
            SfcWindDir => "degrees",
            Zos => "mm",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_static_str())
    }
}

/// The statistics computed over each meaning period.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
#[allow(missing_docs)]
pub enum Statistic {
    #[strum(to_string = "avg")]
    Avg,
    #[strum(to_string = "min")]
    Min,
    #[strum(to_string = "max")]
    Max,
    #[strum(to_string = "var")]
    Var,
    #[strum(to_string = "01p")]
    P01,
    #[strum(to_string = "05p")]
    P05,
    #[strum(to_string = "95p")]
    P95,
    #[strum(to_string = "99p")]
    P99,
}

impl Statistic {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_static_str())
    }
}

static GLOBAL_MODELS_TAS: &[&str] = &[
    "BCC/bcc-csm1-1-m",
    "BNU/BNU-ESM",
    "CCCma/CanESM2",
    "CMCC/CMCC-CMS",
    "CSIRO-BOM/ACCESS1-3",
    "CSIRO-QCCCE/CSIRO-Mk3-6-0",
    "INM/inmcm4",
    "IPSL/IPSL-CM5A-MR",
    "MOHC/HadGEM2-ES",
    "MPI-M/MPI-ESM-MR",
    "NCAR/CCSM4",
    "NCC/NorESM1-M",
    "NOAA-GFDL/GFDL-ESM2M",
    "NSF-DOE-NCAR/CESM1-CAM5",
];

// Shared by tasmax, tasmin, pr and psl.
static GLOBAL_MODELS_STANDARD: &[&str] = &[
    "BCC/bcc-csm1-1-m",
    "BNU/BNU-ESM",
    "CCCma/CanESM2",
    "CMCC/CMCC-CMS",
    "CSIRO-BOM/ACCESS1-3",
    "CSIRO-QCCCE/CSIRO-Mk3-6-0",
    "INM/inmcm4",
    "IPSL/IPSL-CM5A-MR",
    "LASG-CESS/FGOALS-g2",
    "MOHC/HadGEM2-ES",
    "MPI-M/MPI-ESM-MR",
    "NCAR/CCSM4",
    "NCC/NorESM1-M",
    "NOAA-GFDL/GFDL-ESM2M",
    "NSF-DOE-NCAR/CESM1-CAM5",
];

static GLOBAL_MODELS_HUSS: &[&str] = &[
    "BCC/bcc-csm1-1-m",
    "BNU/BNU-ESM",
    "CCCma/CanESM2",
    "CSIRO-BOM/ACCESS1-3",
    "CSIRO-QCCCE/CSIRO-Mk3-6-0",
    "INM/inmcm4",
    "IPSL/IPSL-CM5A-MR",
    "LASG-CESS/FGOALS-g2",
    "MOHC/HadGEM2-ES",
    "NCAR/CCSM4",
    "NCC/NorESM1-M",
    "NOAA-GFDL/GFDL-ESM2M",
    "NSF-DOE-NCAR/CESM1-CAM5",
];

// Shared by sfcWind and sfcWindDir.
static GLOBAL_MODELS_WIND: &[&str] = &[
    "BCC/bcc-csm1-1-m",
    "BNU/BNU-ESM",
    "CCCma/CanESM2",
    "CMCC/CMCC-CMS",
    "CSIRO-BOM/ACCESS1-3",
    "CSIRO-QCCCE/CSIRO-Mk3-6-0",
    "INM/inmcm4",
    "IPSL/IPSL-CM5A-MR",
    "MOHC/HadGEM2-ES",
    "MPI-M/MPI-ESM-MR",
    "NOAA-GFDL/GFDL-ESM2M",
];

static GLOBAL_MODELS_WINDMAX: &[&str] = &[
    "BNU/BNU-ESM",
    "CMCC/CMCC-CMS",
    "CSIRO-BOM/ACCESS1-3",
    "CSIRO-QCCCE/CSIRO-Mk3-6-0",
    "IPSL/IPSL-CM5A-MR",
    "MOHC/HadGEM2-ES",
    "MPI-M/MPI-ESM-MR",
    "NOAA-GFDL/GFDL-ESM2M",
];

static GLOBAL_MODELS_TOS: &[&str] = &[
    "BCC/bcc-csm1-1-m",
    "BNU/BNU-ESM",
    "CCCma/CanESM2",
    "CMCC/CMCC-CMS",
    "CNRM-CERFACS/CNRM-CM5",
    "CSIRO-BOM/ACCESS1-3",
    "CSIRO-QCCCE/CSIRO-Mk3-6-0",
    "INM/inmcm4",
    "IPSL/IPSL-CM5A-MR",
    "MOHC/HadGEM2-ES",
    "MPI-M/MPI-ESM-MR",
    "NCAR/CCSM4",
    "NCC/NorESM1-M",
    "NOAA-GFDL/GFDL-ESM2M",
];

static GLOBAL_MODELS_ZOS: &[&str] = &[
    "BCC/bcc-csm1-1-m",
    "CCCma/CanESM2",
    "CMCC/CMCC-CMS",
    "CNRM-CERFACS/CNRM-CM5",
    "CSIRO-BOM/ACCESS1-3",
    "CSIRO-QCCCE/CSIRO-Mk3-6-0",
    "INM/inmcm4",
    "IPSL/IPSL-CM5A-MR",
    "LASG-CESS/FGOALS-g2",
    "MOHC/HadGEM2-ES",
    "MPI-M/MPI-ESM-MR",
    "NASA-GISS/GISS-E2-R",
    "NASA-GISS/GISS-E2-R-CC",
    "NCAR/CCSM4",
    "NCC/NorESM1-M",
    "NOAA-GFDL/GFDL-ESM2M",
    "NSF-DOE-NCAR/CESM1-CAM5",
];

static ALL_GLOBAL_MODELS: &[&str] = &[
    "BCC/bcc-csm1-1-m",
    "BNU/BNU-ESM",
    "CCCma/CanESM2",
    "CMCC/CMCC-CMS",
    "CNRM-CERFACS/CNRM-CM5",
    "CSIRO-BOM/ACCESS1-3",
    "CSIRO-QCCCE/CSIRO-Mk3-6-0",
    "INM/inmcm4",
    "IPSL/IPSL-CM5A-MR",
    "LASG-CESS/FGOALS-g2",
    "MOHC/HadGEM2-ES",
    "MPI-M/MPI-ESM-MR",
    "NASA-GISS/GISS-E2-R",
    "NASA-GISS/GISS-E2-R-CC",
    "NCAR/CCSM4",
    "NCC/NorESM1-M",
    "NOAA-GFDL/GFDL-ESM2M",
    "NSF-DOE-NCAR/CESM1-CAM5",
];

static REGIONAL_MODELS: &[&str] = &[
    "ICHEC-EC-EARTH/AFR-44",
    "ICHEC-EC-EARTH/ARC-44",
    "ICHEC-EC-EARTH/EUR-44",
    "ICHEC-EC-EARTH/MNA-44",
    "ICHEC-EC-EARTH/NAM-44",
];

// The order variables are listed for a model, a superset of the order the
// per-model tables were published in. Not identical to the declaration
// order of `Variable`.
static GLOBAL_VARIABLE_ORDER: &[Variable] = &[
    Variable::Tas,
    Variable::Tasmax,
    Variable::Tasmin,
    Variable::Pr,
    Variable::Psl,
    Variable::Huss,
    Variable::SfcWind,
    Variable::SfcWindDir,
    Variable::SfcWindmax,
    Variable::Tos,
    Variable::Zos,
];

static REGIONAL_VARIABLES: &[Variable] = &[
    Variable::Tas,
    Variable::Tasmax,
    Variable::Tasmin,
    Variable::Pr,
    Variable::Psl,
    Variable::Huss,
    Variable::SfcWind,
    Variable::SfcWindDir,
    Variable::SfcWindmax,
];

static FULL_STATS: &[Statistic] = &[
    Statistic::Avg,
    Statistic::Min,
    Statistic::Max,
    Statistic::Var,
    Statistic::P01,
    Statistic::P05,
    Statistic::P95,
    Statistic::P99,
];

static REDUCED_STATS: &[Statistic] = &[Statistic::Avg, Statistic::Min, Statistic::Max];

// The variable and statistic pairs extracted for every batch request.
static VITAL_STATISTICS: &[(Variable, Statistic)] = &[
    (Variable::Tas, Statistic::Avg),
    (Variable::Tas, Statistic::P99),
    (Variable::Tas, Statistic::P01),
    (Variable::Tasmax, Statistic::Avg),
    (Variable::Tasmax, Statistic::P99),
    (Variable::Tasmax, Statistic::P01),
    (Variable::Tasmin, Statistic::Avg),
    (Variable::Tasmin, Statistic::P99),
    (Variable::Tasmin, Statistic::P01),
    (Variable::Pr, Statistic::Avg),
    (Variable::Pr, Statistic::P99),
    (Variable::Pr, Statistic::P01),
    (Variable::Psl, Statistic::Avg),
    (Variable::Psl, Statistic::P99),
    (Variable::Psl, Statistic::P01),
    (Variable::Huss, Statistic::Avg),
    (Variable::Huss, Statistic::P99),
    (Variable::Huss, Statistic::P01),
    (Variable::SfcWind, Statistic::Avg),
    (Variable::SfcWind, Statistic::P99),
    (Variable::SfcWind, Statistic::P01),
    (Variable::SfcWindmax, Statistic::Avg),
    (Variable::SfcWindmax, Statistic::P99),
    (Variable::SfcWindmax, Statistic::P01),
    (Variable::Tos, Statistic::Avg),
    (Variable::SfcWindDir, Statistic::Avg),
    (Variable::Zos, Statistic::Avg),
];

/// Lookup tables mapping variables to models and statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vocabs;

impl Vocabs {
    /// Create the vocabulary tables.
    pub fn new() -> Self {
        Vocabs
    }

    /// The models that provide a variable at a domain type, in the order
    /// their values are reported.
    pub fn model_list(
        &self,
        domain_type: DomainType,
        variable: Variable,
    ) -> &'static [&'static str] {
        use Variable::*;

        match domain_type {
            DomainType::Global => match variable {
                Tas => GLOBAL_MODELS_TAS,
                Tasmax | Tasmin | Pr | Psl => GLOBAL_MODELS_STANDARD,
                Huss => GLOBAL_MODELS_HUSS,
                SfcWind | SfcWindDir => GLOBAL_MODELS_WIND,
                SfcWindmax => GLOBAL_MODELS_WINDMAX,
                Tos => GLOBAL_MODELS_TOS,
                Zos => GLOBAL_MODELS_ZOS,
            },
            DomainType::Regional => REGIONAL_MODELS,
        }
    }

    /// Every model that could be available for a domain type.
    pub fn all_models(&self, domain_type: DomainType) -> &'static [&'static str] {
        match domain_type {
            DomainType::Global => ALL_GLOBAL_MODELS,
            DomainType::Regional => REGIONAL_MODELS,
        }
    }

    /// The variables one model provides at a domain type.
    pub fn variable_list(&self, domain_type: DomainType, inst_model: &str) -> Vec<Variable> {
        let order = match domain_type {
            DomainType::Global => GLOBAL_VARIABLE_ORDER,
            DomainType::Regional => REGIONAL_VARIABLES,
        };

        order
            .iter()
            .copied()
            .filter(|var| self.model_list(domain_type, *var).contains(&inst_model))
            .collect()
    }

    /// The statistics available for a variable.
    pub fn stats_list(&self, variable: Variable) -> &'static [Statistic] {
        match variable {
            Variable::SfcWindDir | Variable::Zos => REDUCED_STATS,
            _ => FULL_STATS,
        }
    }

    /// The variable and statistic pairs extracted for a domain type.
    ///
    /// The ocean variables are dropped for the regional domains, which only
    /// cover land areas.
    pub fn statistic_ids(&self, domain_type: DomainType) -> Vec<(Variable, Statistic)> {
        VITAL_STATISTICS
            .iter()
            .copied()
            .filter(|(var, _)| {
                domain_type == DomainType::Global
                    || !matches!(var, Variable::Tos | Variable::Zos)
            })
            .collect()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
