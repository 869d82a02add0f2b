use clap::Parser;
use dirsnap::cli::{Cli, Command, DiffArgs, SnapArgs};
use dirsnap::config::{Config, FileConfig};
use dirsnap::diff;
use dirsnap::report;
use dirsnap::scan;
use dirsnap::store;
use dirsnap::Result;
use env_logger::{Builder, Env};

fn init_logger(verbose: bool) {
    // RUST_LOG wins when set, e.g. RUST_LOG=trace dirsnap snap ...
    let default_level = if verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn run_snap(args: &SnapArgs, config: &Config) -> Result<()> {
    let result = scan::run(&args.directory, config)?;
    store::save(&args.snapshot_file, &result.snapshot)?;

    report::print_scan_info(&result.stats, config.verbose);
    println!(
        "Snapshot of {} files saved to {}",
        result.snapshot.len(),
        args.snapshot_file.display()
    );
    Ok(())
}

fn run_diff(args: &DiffArgs, config: &Config) -> Result<()> {
    // a bad snapshot file fails before the directory is touched
    let old = store::load(&args.snapshot_file)?;
    let current = scan::run(&args.directory, config)?;

    report::print_scan_info(&current.stats, config.verbose);
    let result = diff::compare(&old, &current.snapshot);
    report::print_diff(&result, config)
}

fn main() {
    let cli = Cli::parse();

    let file_config = match FileConfig::load(cli.config.as_deref()) {
        Ok(file_config) => file_config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let (options, json_output) = match &cli.command {
        Command::Snap(args) => (&args.scan, false),
        Command::Diff(args) => (&args.scan, args.json),
    };

    let config = Config::from_options(options, json_output, &file_config);

    init_logger(config.verbose);

    let outcome = match &cli.command {
        Command::Snap(args) => run_snap(args, &config),
        Command::Diff(args) => run_diff(args, &config),
    };

    if let Err(e) = outcome {
        log::debug!("{e:?}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
