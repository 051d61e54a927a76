//! Command line options that are used across applications.

use std::path::{Path, PathBuf};

use clap::{crate_version, App, Arg, ArgMatches};
use dirs::home_dir;

use crate::{errors::ClimateStatsErr, extract::StatsPaths};

/// Struct to package up the command line arguments shared by the
/// applications.
#[derive(Clone, Debug)]
pub struct CommonCmdLineArgs {
    // Path to the root directory holding the data tree, the reference grid
    // files and the caches.
    root: PathBuf,
}

impl<'a, 'b> CommonCmdLineArgs {
    /// Create a new app with the common arguments.
    pub fn new_app(app_name: &'static str, about: &'static str) -> App<'a, 'b> {
        App::new(app_name)
            .author("Climate Risk Platform Developers")
            .about(about)
            .version(crate_version!())
            .arg(
                Arg::with_name("root")
                    .short("r")
                    .long("root")
                    .takes_value(true)
                    .help("Path to the root data directory.")
                    .long_help(concat!(
                        "Path to the root data directory. Defaults to",
                        " '${HOME}/climate-stats/'. The layout underneath is data/ for the",
                        " extracted model statistics, grid_ref_files/ for the reference",
                        " grids and web_cache/ for the result caches."
                    )),
            )
    }

    /// Process an `App` to get the parsed values out of it and the matches
    /// object so an application can continue with further argument parsing.
    pub fn matches(app: App<'a, 'b>) -> Result<(Self, ArgMatches<'a>), ClimateStatsErr> {
        let matches = app.get_matches();

        let root = matches
            .value_of("root")
            .map(PathBuf::from)
            .or_else(|| home_dir().map(|hd| hd.join("climate-stats")))
            .ok_or_else(|| {
                ClimateStatsErr::GeneralError(
                    "no --root given and no home directory to default to".to_string(),
                )
            })?;

        Ok((CommonCmdLineArgs { root }, matches))
    }

    /// Get the root data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The filesystem layout under the root.
    pub fn paths(&self) -> StatsPaths {
        StatsPaths::new(&self.root)
    }
}
