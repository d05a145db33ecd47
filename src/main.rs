// main.rs - main program
//
// irc-automode - IRC automatic mode privilege checker
// Copyright (C) 2022  Mateusz Szpakowski
//
// This library is free software; you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public
// License as published by the Free Software Foundation; either
// version 2.1 of the License, or (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this library; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301  USA

use std::error::Error;
use std::process;
use clap::Parser;
use tracing::*;
use tracing_subscriber::EnvFilter;

use irc_automode::config::{Cli, MainConfig};
use irc_automode::can_grant;

fn initialize_logging(config: &MainConfig) {
    // RUST_LOG has precedence over configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// exit codes: granted, denied, error
const EXIT_GRANTED: i32 = 0;
const EXIT_DENIED: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn run(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    let config = MainConfig::new(cli)?;
    initialize_logging(&config);
    let source = config.capability_source()?;

    let granted = can_grant(&source, &cli.server, &cli.actor, &cli.target);
    info!("Checked {} giving {} on {}", cli.actor, cli.target, cli.server);
    Ok(granted)
}

fn exit_code(outcome: &Result<bool, Box<dyn Error>>) -> i32 {
    match outcome {
        Ok(true) => EXIT_GRANTED,
        Ok(false) => EXIT_DENIED,
        Err(_) => EXIT_ERROR,
    }
}

fn main() {
    let cli = Cli::parse();
    let outcome = run(&cli);
    match outcome {
        Ok(true) => println!("yes"),
        Ok(false) => println!("no"),
        Err(ref e) => eprintln!("Error: {}", e),
    }
    process::exit(exit_code(&outcome));
}

#[cfg(test)]
mod test {
    use super::*;

    use std::env::temp_dir;

    #[test]
    fn test_exit_code() {
        assert_eq!(0, exit_code(&Ok(true)));
        assert_eq!(1, exit_code(&Ok(false)));
        let failed: Result<bool, Box<dyn Error>> = Err("broken".into());
        assert_eq!(2, exit_code(&failed));
    }

    #[test]
    fn test_run_with_missing_config_is_error() {
        let cli = Cli{ config: Some(temp_dir().join("no_such_automode_main.toml")
                    .to_string_lossy().to_string()),
            server: "freenode".to_string(), actor: "o".to_string(),
            target: "v".to_string(), prefix: None, log_level: None };
        let outcome = run(&cli);
        assert_eq!(true, outcome.is_err());
        assert_eq!(EXIT_ERROR, exit_code(&outcome));
    }
}
