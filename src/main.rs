use std::fs::File;
use std::io::{stdin, stdout, Read, Write};

use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches, SubCommand};

use geocase::{Config, Corrector, GazetteerBuilder, GazetteerIndex, RuleTable};
use serde_json::json;

fn main() -> Result<()> {
    let matches = App::new("geocase")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Aleksei Voronov <despawn@gmail.com>")
        .about("Build a gazetteer index, or use one to fix capitalization of names in text.")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file.")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log more; repeat for debug output.")
                .multiple(true)
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("build-index")
                .about("Create a gazetteer index from GeoNames dump files")
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("File where the index will be written.")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("GeoNames dump file, tab separated, one place per line.")
                        .takes_value(true)
                        .required(true)
                        .multiple(true),
                )
                .arg(
                    Arg::with_name("max-words")
                        .long("max-words")
                        .value_name("N")
                        .help("Skip names with more words than this.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("min-importance")
                        .long("min-importance")
                        .value_name("N")
                        .help("Skip places with a smaller population than this.")
                        .takes_value(true),
                ),
        )
        .subcommand(
            table_args(SubCommand::with_name("correct"))
                .about("Fix capitalization of names and fixed categories in text")
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("File containing text to correct. stdin by default.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("File into which corrected text will be written. stdout by default.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("report")
                        .long("report")
                        .help("Write a JSON report of the changes instead of the text."),
                ),
        )
        .subcommand(
            table_args(SubCommand::with_name("check"))
                .about("Check how single names should be written")
                .arg(
                    Arg::with_name("name")
                        .value_name("NAME")
                        .help("Word or name to check, e.g. \"new york\".")
                        .required(true)
                        .multiple(true),
                ),
        )
        .subcommand(
            table_args(SubCommand::with_name("stats"))
                .about("Print a JSON summary of the loaded tables"),
        )
        .get_matches();

    let (command, command_matches) = matches.subcommand();

    // global options may come before or after the subcommand
    let verbosity = command_matches
        .map_or(0, |m| m.occurrences_of("verbose"))
        .max(matches.occurrences_of("verbose"));
    init_logging(verbosity);

    let config_path = command_matches
        .and_then(|m| m.value_of("config"))
        .or_else(|| matches.value_of("config"));
    let mut config = match config_path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("cannot load config from {}", path))?,
        None => Config::default(),
    };

    match (command, command_matches) {
        ("build-index", Some(matches)) => {
            if let Some(max_words) = parse_arg(matches, "max-words")? {
                config.max_words = max_words;
            }
            if let Some(min_importance) = parse_arg(matches, "min-importance")? {
                config.min_importance = min_importance;
            }
            // both .unwraps are safe because the arguments are required
            let output_filename = matches.value_of("output").unwrap();
            let input_filenames: Vec<_> = matches.values_of("input").unwrap().collect();
            do_build_index(&config, input_filenames, output_filename)
        }
        ("correct", Some(matches)) => {
            override_tables(&mut config, matches);
            do_correct(
                &config,
                matches.value_of("input"),
                matches.value_of("output"),
                matches.is_present("report"),
            )
        }
        ("check", Some(matches)) => {
            override_tables(&mut config, matches);
            // safe because the argument is required
            let names: Vec<_> = matches.values_of("name").unwrap().collect();
            do_check(&config, names)
        }
        ("stats", Some(matches)) => {
            override_tables(&mut config, matches);
            do_stats(&config)
        }
        _ => {
            eprintln!("{}", matches.usage());
            Ok(())
        }
    }
}

fn table_args<'a, 'b>(command: App<'a, 'b>) -> App<'a, 'b> {
    command
        .arg(
            Arg::with_name("rules")
                .short("r")
                .long("rules")
                .value_name("FILE")
                .help("JSON rule file. The built-in rule table by default.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("index")
                .short("x")
                .long("index")
                .value_name("FILE")
                .help("Gazetteer index produced by `build-index`. Rules only by default.")
                .takes_value(true),
        )
}

fn override_tables(config: &mut Config, matches: &ArgMatches) {
    if let Some(rules) = matches.value_of("rules") {
        config.rules = Some(rules.into());
    }
    if let Some(index) = matches.value_of("index") {
        config.index = Some(index.into());
    }
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn parse_arg<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|value| {
            value
                .parse()
                .with_context(|| format!("invalid value for --{}: {}", name, value))
        })
        .transpose()
}

fn do_build_index(config: &Config, input_filenames: Vec<&str>, index_filename: &str) -> Result<()> {
    let mut builder = GazetteerBuilder::new()
        .with_max_words(config.max_words)
        .with_min_importance(config.min_importance);
    for filename in input_filenames {
        builder
            .add_geonames_file(filename)
            .with_context(|| format!("cannot read {}", filename))?;
    }
    let index = builder.into_index();
    index.save_to_file(index_filename)?;

    Ok(())
}

fn do_correct(
    config: &Config,
    input_filename: Option<&str>,
    output_filename: Option<&str>,
    report: bool,
) -> Result<()> {
    let corrector = Corrector::from_config(config).context("cannot load tables")?;

    let mut text = String::new();
    match input_filename {
        Some(filename) => File::open(filename)?.read_to_string(&mut text)?,
        None => stdin().read_to_string(&mut text)?,
    };

    let mut output: Box<dyn Write> = match output_filename {
        Some(filename) => Box::new(File::create(filename)?),
        None => Box::new(stdout()),
    };

    if report {
        let correction = corrector.correct_with_report(&text);
        serde_json::to_writer_pretty(&mut output, &correction)?;
        output.write_all(b"\n")?;
    } else {
        output.write_all(corrector.correct(&text).as_bytes())?;
    }
    output.flush()?;

    Ok(())
}

fn do_check(config: &Config, names: Vec<&str>) -> Result<()> {
    let corrector = Corrector::from_config(config).context("cannot load tables")?;

    let results: Vec<_> = names
        .into_iter()
        .map(|name| {
            json!({
                "original": name,
                "check": corrector.check(name),
                "description": corrector.describe(name),
            })
        })
        .collect();

    let stdout = stdout();
    let mut output = stdout.lock();
    serde_json::to_writer_pretty(&mut output, &results)?;
    output.write_all(b"\n")?;

    Ok(())
}

fn do_stats(config: &Config) -> Result<()> {
    let rules = match &config.rules {
        Some(path) => RuleTable::load_from_file(path)
            .with_context(|| format!("cannot load rules from {}", path.display()))?,
        None => RuleTable::default(),
    };
    let index = match &config.index {
        Some(path) => GazetteerIndex::load_from_file(path)
            .with_context(|| format!("cannot load index from {}", path.display()))?,
        None => GazetteerIndex::default(),
    };

    let stats = json!({
        "rules": {
            "phrases": rules.len(),
            "max_words": rules.max_words(),
            "by_category": rules.category_counts(),
        },
        "index": index.stats(),
    });

    let stdout = stdout();
    let mut output = stdout.lock();
    serde_json::to_writer_pretty(&mut output, &stats)?;
    output.write_all(b"\n")?;

    Ok(())
}
