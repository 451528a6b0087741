// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use tracker::config::Settings;
use tracker::service::ExpenseService;
use tracker::storage::JsonFileStore;
use tracker::{cli, commands, telemetry};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let settings = Settings::from_matches(&matches);
    init_logging(&settings);

    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        println!();
        std::process::exit(1);
    };

    let result = run(&settings, name, sub);
    if let Err(err) = &result {
        tracing::error!(command = name, "{:#}", err);
    }
    result
}

fn run(settings: &Settings, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    tracing::info!(command = name, data_file = %settings.data_file.display(), "command called");
    let store = JsonFileStore::open(&settings.data_file)?;
    let svc = ExpenseService::new(store);

    match name {
        "add" => commands::add::handle(&svc, sub)?,
        "list" => commands::list::handle(&svc, sub)?,
        "summary" => commands::summary::handle(&svc, sub)?,
        "delete" => commands::delete::handle(&svc, sub)?,
        "edit" => commands::edit::handle(&svc, sub)?,
        other => anyhow::bail!("Unknown command: {}", other),
    }
    Ok(())
}

/// Logs go to the configured file; if it cannot be opened only errors are
/// reported, on stderr.
fn init_logging(settings: &Settings) {
    let installed = match telemetry::log_file_sink(&settings.log_file) {
        Ok(sink) => {
            let subscriber = telemetry::get_subscriber(settings.log_level.clone(), sink);
            telemetry::init_subscriber(subscriber)
        }
        Err(err) => {
            eprintln!(
                "warning: cannot open log file {}: {}",
                settings.log_file.display(),
                err
            );
            let subscriber = telemetry::get_subscriber("error".into(), std::io::stderr);
            telemetry::init_subscriber(subscriber)
        }
    };
    if let Err(err) = installed {
        eprintln!("warning: logging disabled: {}", err);
    }
}
