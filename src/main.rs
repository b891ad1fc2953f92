mod cli;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use punchclock::config::Config;
use punchclock::logging;
use punchclock::storage::Storage;

/// Overrides the storage root and the config location.
const HOME_ENV: &str = "PUNCHCLOCK_HOME";

fn main() {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    let home = std::env::var_os(HOME_ENV).map(PathBuf::from);

    let config = Config::load_in(home.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let root = storage_root(home, &config).unwrap_or_else(|| {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    });

    let storage = match Storage::new(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, &config, &storage) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn storage_root(home: Option<PathBuf>, config: &Config) -> Option<PathBuf> {
    home.or_else(|| config.data_dir.clone())
        .or_else(Storage::default_root)
}
