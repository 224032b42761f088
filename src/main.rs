use std::path::{Path, PathBuf};

use clap::Parser;
use consoletrack::cli::{Cli, Command};
use consoletrack::config::Config;
use consoletrack::fetch::HttpFetcher;
use consoletrack::store::{persist, Store};
use consoletrack::{report, scrape};

fn resolve_store_path(override_path: Option<PathBuf>) -> PathBuf {
    match override_path {
        Some(path) => path,
        None => persist::default_store_path().unwrap_or_else(|e| {
            eprintln!("Error resolving store path: {e}");
            std::process::exit(1);
        }),
    }
}

fn load_store(path: &Path) -> Store {
    match persist::load(path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error reading store {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan(args) => {
            let config = match Config::from_scan_args(&args) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };

            let store_path = resolve_store_path(config.store_path.clone());
            let mut store = load_store(&store_path);

            let fetcher = match HttpFetcher::new(&config) {
                Ok(fetcher) => fetcher,
                Err(e) => {
                    eprintln!("Error building http client: {e}");
                    std::process::exit(1);
                }
            };

            let outcome = scrape::run(&config, &fetcher, &mut store);
            if outcome.aborted {
                eprintln!(
                    "warning: gave up after {} fetch errors; keeping the {} pages collected so far",
                    outcome.fetch_errors, outcome.pages
                );
            }

            report::print_available(&store, config.json_output);
            report::print_changes(&store, config.json_output);

            // partial runs are saved too; the store only ever grows by
            // genuine observations
            if let Err(e) = persist::save(&store_path, &store) {
                eprintln!("Error saving store {}: {e}", store_path.display());
                std::process::exit(1);
            }

            if config.verbose {
                if let Some(duration_ms) = outcome.duration_ms {
                    eprintln!(
                        "scan completed in {:.2}s: {} pages, {} observations, {} recorded",
                        duration_ms as f64 / 1000.0,
                        outcome.pages,
                        outcome.observed,
                        outcome.recorded
                    );
                }
            }
        }
        Command::Report(args) => {
            let store_path = resolve_store_path(args.store);
            let store = load_store(&store_path);
            report::print_available(&store, args.json);
        }
        Command::Changes(args) => {
            let store_path = resolve_store_path(args.store);
            let store = load_store(&store_path);
            report::print_changes(&store, args.json);
        }
    }
}
