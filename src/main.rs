// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use landas::commands::features::FeaturesCommand;
use landas::commands::report::ReportCommand;
use landas::commands::toolchain::ToolchainCommand;
use landas::config::new_landas_config;
use landas::error::{Result, format_error_chain, get_exit_code};
use landas::logging;

#[derive(Parser)]
#[command(name = "landas")]
#[command(author, version, about = "Platform and toolchain detection tool", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the full platform detection report
    #[command(visible_alias = "r")]
    Report {
        /// Show the one-line summary instead of the full report
        #[arg(short, long)]
        brief: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Probe the C/C++ toolchain and show what answered
    #[command(visible_alias = "t")]
    Toolchain {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List language and runtime feature availability
    #[command(visible_alias = "f")]
    Features {
        /// Show only toolchain language features
        #[arg(long, conflicts_with = "runtime_only")]
        language_only: bool,

        /// Show only runtime CPU features
        #[arg(long)]
        runtime_only: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn setup_logger(cli: &Cli) {
    logging::setup_logger(cli.verbose);
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger based on CLI flags and environment
    setup_logger(&cli);

    // Load configuration once at startup
    let config = match new_landas_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| {
        match cli.command {
            Commands::Report { brief, json } => {
                let command = ReportCommand::new(&config)?;
                command.execute(brief, json)
            }
            Commands::Toolchain { json } => {
                let command = ToolchainCommand::new(&config)?;
                command.execute(json)
            }
            Commands::Features {
                language_only,
                runtime_only,
                json,
            } => {
                let command = FeaturesCommand::new(&config)?;
                command.execute(language_only, runtime_only, json)
            }
        }
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
