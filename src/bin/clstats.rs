//! Climate statistics extraction tool.
//!
//! Resolves asset locations onto the model grids and extracts statistics,
//! either as the vital statistics JSON, the full summary CSV, or a single
//! model, variable and statistic at a point.

use clap::{Arg, ArgMatches, SubCommand};
use climate_stats::{
    ClimateStatsErr, CommonCmdLineArgs, DomainType, Experiment, Location, MeaningPeriod,
    NcGridReader, ReferenceGrids, Statistic, StatsExtractor, TimePeriod, Variable,
};
use std::{error::Error, fs::File, io::Write, str::FromStr};
use strum::IntoEnumIterator;

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
    let app = CommonCmdLineArgs::new_app(
        "clstats",
        "Extract climate model statistics at asset locations.",
    )
    .subcommand(
        SubCommand::with_name("stats")
            .about(concat!(
                "Extract the vital statistics for one or more locations and print the",
                " response as JSON."
            ))
            .arg(location_arg().multiple(true))
            .arg(experiment_arg())
            .arg(time_period_arg()),
    )
    .subcommand(
        SubCommand::with_name("csv")
            .about("Build the full multi experiment summary CSV for one location.")
            .arg(location_arg())
            .arg(
                Arg::with_name("to-file")
                    .short("f")
                    .long("to-file")
                    .help("Write to a file named for the location instead of stdout."),
            ),
    )
    .subcommand(
        SubCommand::with_name("point")
            .about("Extract one model, variable and statistic at a location.")
            .arg(location_arg())
            .arg(experiment_arg())
            .arg(time_period_arg())
            .arg(
                Arg::with_name("domain-type")
                    .short("d")
                    .long("domain-type")
                    .takes_value(true)
                    .default_value("Global")
                    .help("Domain type, Global or Regional."),
            )
            .arg(
                Arg::with_name("model")
                    .short("m")
                    .long("model")
                    .takes_value(true)
                    .required(true)
                    .help("Model id, e.g. BCC/bcc-csm1-1-m or ICHEC-EC-EARTH/EUR-44."),
            )
            .arg(
                Arg::with_name("variable")
                    .short("v")
                    .long("variable")
                    .takes_value(true)
                    .default_value("tas")
                    .help("Variable id, e.g. tas or pr."),
            )
            .arg(
                Arg::with_name("statistic")
                    .short("s")
                    .long("statistic")
                    .takes_value(true)
                    .default_value("avg")
                    .help("Statistic, e.g. avg or 99p."),
            ),
    );

    let (common_args, matches) = CommonCmdLineArgs::matches(app)?;

    let paths = common_args.paths();
    let grids = ReferenceGrids::load(&paths.grid_ref_dir, &NcGridReader)?;
    let extractor = StatsExtractor::new(&paths)?;

    match matches.subcommand() {
        ("stats", Some(sub_args)) => stats(&extractor, &grids, sub_args),
        ("csv", Some(sub_args)) => csv(&extractor, &grids, sub_args),
        ("point", Some(sub_args)) => point(&extractor, &grids, sub_args),
        _ => {
            println!("No subcommand given, try the -h or --help option.");
            ::std::process::exit(1);
        }
    }
}

fn location_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("location")
        .short("l")
        .long("location")
        .takes_value(true)
        .required(true)
        .help("A location as '<asset_id>,<lat>,<lon>'.")
}

fn experiment_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("experiment")
        .short("e")
        .long("experiment")
        .takes_value(true)
        .default_value("rcp85")
        .help("Experiment, rcp45 or rcp85.")
}

fn time_period_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("time-period")
        .short("t")
        .long("time-period")
        .takes_value(true)
        .default_value("2055")
        .help("Time period, 2035 or 2055.")
}

fn stats(
    extractor: &StatsExtractor,
    grids: &ReferenceGrids,
    sub_args: &ArgMatches,
) -> Result<(), ClimateStatsErr> {
    let experiment = Experiment::from_str(sub_args.value_of("experiment").unwrap_or("rcp85"))?;
    let time_period = TimePeriod::from_str(sub_args.value_of("time-period").unwrap_or("2055"))?;

    let locations = sub_args
        .values_of("location")
        .into_iter()
        .flatten()
        .map(|text| Location::new(text, grids))
        .collect::<Result<Vec<_>, _>>()?;

    let response = extractor.extract_data(experiment, time_period, &locations)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn csv(
    extractor: &StatsExtractor,
    grids: &ReferenceGrids,
    sub_args: &ArgMatches,
) -> Result<(), ClimateStatsErr> {
    let location = Location::new(sub_args.value_of("location").unwrap_or(""), grids)?;

    let csv = extractor.extract_full_summary_csv(&location)?;

    if sub_args.is_present("to-file") {
        let coords = location.requested().coords();
        let file_name = format!("climate_stats_lat_{:.3}_lon_{:.3}.csv", coords.lat, coords.lon);

        let mut file = File::create(&file_name)?;
        file.write_all(csv.as_bytes())?;
        println!("Wrote {}", file_name);
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn point(
    extractor: &StatsExtractor,
    grids: &ReferenceGrids,
    sub_args: &ArgMatches,
) -> Result<(), ClimateStatsErr> {
    let location = Location::new(sub_args.value_of("location").unwrap_or(""), grids)?;
    let domain_type = DomainType::from_str(sub_args.value_of("domain-type").unwrap_or("Global"))?;
    let inst_model = sub_args.value_of("model").unwrap_or("");
    let variable = Variable::from_str(sub_args.value_of("variable").unwrap_or("tas"))?;
    let statistic = Statistic::from_str(sub_args.value_of("statistic").unwrap_or("avg"))?;
    let experiment = Experiment::from_str(sub_args.value_of("experiment").unwrap_or("rcp85"))?;
    let time_period = TimePeriod::from_str(sub_args.value_of("time-period").unwrap_or("2055"))?;

    let point_data = extractor.extract_data_at_point(
        domain_type,
        inst_model,
        experiment,
        time_period,
        variable,
        statistic,
        &location,
    )?;

    match point_data.grid_box {
        Some(grid_box) => println!("Grid box: ({}, {})", grid_box.lat, grid_box.lon),
        None => println!("No covering grid box for {} at {}", inst_model, location),
    }

    for (period, value) in MeaningPeriod::iter().zip(&point_data.values) {
        match value {
            Some(value) => println!("{:>4}: {:.2}", period.column_header(), value),
            None => println!("{:>4}: missing", period.column_header()),
        }
    }

    Ok(())
}
