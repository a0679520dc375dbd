use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use tabbench::bench::BenchmarkRunner;
use tabbench::config::{BenchConfig, ModelConfig, ModelType};
use tabbench::data::{load_wdbc, read_labeled_csv, CsvReaderConfig, Dataset};
use tabbench::report;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("TABBENCH_LOG", "error,tabbench=info"))
        .init();

    let matches = Command::new("tabbench")
        .version(clap::crate_version!())
        .about("Benchmark tabular classification models on a labeled dataset")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("bench")
                .about("Train and evaluate the configured models on one dataset")
                .arg(
                    Arg::new("data")
                        .help("Path to the dataset file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Dataset layout")
                        .value_parser(["wdbc", "csv"])
                        .default_value("wdbc"),
                )
                .arg(
                    Arg::new("label_column")
                        .long("label-column")
                        .help("Label column name for --format csv")
                        .default_value("label"),
                )
                .arg(
                    Arg::new("test_fraction")
                        .long("test-fraction")
                        .help("Fraction of rows held out for evaluation, in (0, 1)")
                        .value_parser(clap::value_parser!(f32))
                        .default_value("0.33"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for the train/test split")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("42"),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .short('m')
                        .help("Model to benchmark (repeatable; default: both)")
                        .value_parser(["tab_transformer", "gbdt"])
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Full benchmark configuration as JSON; overrides the flags above")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("device")
                        .long("device")
                        .help("Compute device for the transformer model, e.g. cpu or cuda:0"),
                )
                .arg(
                    Arg::new("weights")
                        .long("weights")
                        .help("Safetensors checkpoint for the transformer model")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Write an HTML report to this path")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("bench", sub)) => run_bench(sub),
        _ => unreachable!("subcommand is required"),
    }
}

fn run_bench(matches: &ArgMatches) -> Result<()> {
    let config = assemble_config(matches)?;
    let dataset = load_dataset(matches)?;

    let summary = BenchmarkRunner::new(config).run(&dataset)?;
    report::print_summary(&summary);

    if let Some(path) = matches.get_one::<PathBuf>("report") {
        report::write_html_report(&summary, path)?;
    }
    Ok(())
}

fn load_dataset(matches: &ArgMatches) -> Result<Dataset> {
    let data = matches
        .get_one::<PathBuf>("data")
        .expect("data is required");
    match matches.get_one::<String>("format").map(String::as_str) {
        Some("csv") => {
            let reader_config = CsvReaderConfig {
                label_column: matches
                    .get_one::<String>("label_column")
                    .cloned()
                    .unwrap_or_else(|| "label".to_string()),
                ..CsvReaderConfig::default()
            };
            read_labeled_csv(data, &reader_config)
        }
        _ => load_wdbc(data),
    }
}

fn assemble_config(matches: &ArgMatches) -> Result<BenchConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => BenchConfig::from_json_file(path)?,
        None => {
            let mut config = BenchConfig {
                test_fraction: *matches
                    .get_one::<f32>("test_fraction")
                    .expect("defaulted"),
                seed: *matches.get_one::<u64>("seed").expect("defaulted"),
                ..BenchConfig::default()
            };
            if let Some(names) = matches.get_many::<String>("model") {
                config.models = names
                    .map(|name| {
                        name.parse::<ModelType>()
                            .map(ModelConfig::new)
                            .map_err(|e| anyhow!(e))
                    })
                    .collect::<Result<Vec<_>>>()?;
            }
            config
        }
    };

    // CLI overrides for the transformer entries.
    let device_override = matches.get_one::<String>("device");
    let weights_override = matches.get_one::<PathBuf>("weights");
    if let Some(path) = weights_override {
        if !path.exists() {
            return Err(anyhow!("Weights file not found: {}", path.display()));
        }
    }
    for model in &mut config.models {
        if let ModelType::TabTransformer {
            device, weights, ..
        } = &mut model.model_type
        {
            if let Some(d) = device_override {
                if d != device {
                    log::debug!("Overriding device '{}' with '{}'", device, d);
                }
                *device = d.clone();
            }
            if let Some(w) = weights_override {
                *weights = Some(w.clone());
            }
        }
    }

    Ok(config)
}
