//! Cache warmer.
//!
//! Reads a file of asset locations and runs extractions for each one so the
//! result caches are populated before the first interactive request.

use clap::Arg;
use climate_stats::{
    ClimateStatsErr, CommonCmdLineArgs, Experiment, Location, NcGridReader, ReferenceGrids,
    StatsExtractor, TimePeriod,
};
use std::{
    error::Error,
    fs::File,
    io::{BufRead, BufReader},
    str::FromStr,
};

fn main() {
    env_logger::init();

    if let Err(ref e) = run() {
        println!("error: {}", e);

        let mut err: &dyn Error = e;
        while let Some(cause) = err.source() {
            println!("caused by: {}", cause);
            err = cause;
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<(), ClimateStatsErr> {
    let app = CommonCmdLineArgs::new_app("clwarm", "Pre-populate the climate statistics caches.")
        .arg(
            Arg::with_name("assets")
                .index(1)
                .required(true)
                .takes_value(true)
                .help("File with one 'LAT LON' pair per line; a LAT/LON header line is skipped."),
        )
        .arg(
            Arg::with_name("experiment")
                .short("e")
                .long("experiment")
                .takes_value(true)
                .default_value("rcp45")
                .help("Experiment to warm the stats cache for."),
        )
        .arg(
            Arg::with_name("time-period")
                .short("t")
                .long("time-period")
                .takes_value(true)
                .default_value("2035")
                .help("Time period to warm the stats cache for."),
        )
        .arg(
            Arg::with_name("full")
                .long("full")
                .help("Also build the full summary CSV for every location."),
        );

    let (common_args, matches) = CommonCmdLineArgs::matches(app)?;

    let experiment = Experiment::from_str(matches.value_of("experiment").unwrap_or("rcp45"))?;
    let time_period = TimePeriod::from_str(matches.value_of("time-period").unwrap_or("2035"))?;
    let build_full = matches.is_present("full");

    let paths = common_args.paths();
    let grids = ReferenceGrids::load(&paths.grid_ref_dir, &NcGridReader)?;
    let extractor = StatsExtractor::new(&paths)?;

    let assets_file = matches.value_of("assets").unwrap_or("");
    let location_strings = read_asset_locations(assets_file)?;
    let num_locations = location_strings.len();

    // One location at a time, and keep going when one fails, so a bad line
    // does not abandon the rest of the warm up.
    for (i, location_string) in location_strings.iter().enumerate() {
        println!("[{}/{}] Running for: {}", i + 1, num_locations, location_string);

        let location = match Location::new(location_string, &grids) {
            Ok(location) => location,
            Err(err) => {
                println!("  skipped, could not resolve: {}", err);
                continue;
            }
        };

        if let Err(err) = extractor.extract_data(experiment, time_period, &[location.clone()]) {
            println!("  stats extraction failed: {}", err);
        }

        if build_full {
            if let Err(err) = extractor.extract_full_summary_csv(&location) {
                println!("  full summary failed: {}", err);
            }
        }
    }

    Ok(())
}

// Parse 'LAT LON' lines into location strings with sequential asset ids.
fn read_asset_locations(path: &str) -> Result<Vec<String>, ClimateStatsErr> {
    let file = File::open(path)?;

    let mut locations = vec![];
    let mut n = 1;

    for line in BufReader::new(file).lines() {
        let line = line?;

        if line.contains("LAT") || line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let lat = fields.next();
        let lon = fields.next();

        match (lat, lon) {
            (Some(lat), Some(lon)) => {
                locations.push(format!("test_{:03},{},{}", n, lat, lon));
                n += 1;
            }
            _ => {
                println!("Skipping malformed line: {}", line);
            }
        }
    }

    Ok(locations)
}
