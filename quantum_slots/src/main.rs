/*
Quantum Slots: a terminal client for the quantum slot machine.

Spin the reels, try an attack and watch the server console,
either in a full-screen TUI or one command at a time.
*/

#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use qs_core::{api::FlagParam, err};

mod cli;
mod config;
mod session;
mod tui;

use config::SlotsConfig;
use session::Session;
use tui::AppResult;

#[derive(Parser, Debug)]
#[command(name = "quantum_slots", version, about = "Terminal client for the quantum slot machine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    global: GlobalArgs,
}

/// Overrides for the config file, usable with every command.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Game server address, e.g. http://127.0.0.1:8000
    #[arg(long, global = true, env = "QS_BASE_URL")]
    pub base_url: Option<String>,
    /// Name of the toggle's query parameter
    #[arg(long, global = true, value_name = "use_quantum|entangled")]
    pub flag_param: Option<FlagParam>,
    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Give up on requests after this many milliseconds (0 = never)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Full-screen client (default)
    Tui,
    /// Spin the reels once and print them
    Spin {
        /// Value of the toggle, defaults to the configured one
        #[arg(long)]
        flag: Option<bool>,
    },
    /// Try an attack once and print the outcome
    Attack {
        #[arg(long)]
        flag: Option<bool>,
    },
    /// Print the server console once
    Console,
    /// Keep printing the server console
    Watch {
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Stop after this many polls
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,
    },
    /// Inspect or write the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the effective settings
    Show,
    /// Print where the config file lives
    Path,
    /// Write the given options into the config file
    Save {
        #[arg(long)]
        flag_default: Option<bool>,
        #[arg(long)]
        poll_interval_ms: Option<u64>,
    },
}

fn main() {
    if let Err(error) = run(Cli::parse()) {
        err!("{error}");
        std::process::exit(1);
    }
}

fn run(args: Cli) -> AppResult<()> {
    let config_path = args.global.config.clone().or_else(SlotsConfig::default_path);
    let config = match &config_path {
        Some(path) => SlotsConfig::load_s(path)?,
        None => SlotsConfig::default(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let command = match args.command.unwrap_or(Commands::Tui) {
        Commands::Config { action } => {
            return runtime.block_on(cli::config(
                action,
                &args.global,
                config,
                config_path.as_deref(),
            ));
        }
        command => command,
    };

    let session = Session::resolve(&args.global, &config)?;
    match command {
        Commands::Tui | Commands::Config { .. } => tui::run_tui(runtime.handle(), &session),
        Commands::Spin { flag } => runtime.block_on(cli::spin(&session, flag)),
        Commands::Attack { flag } => runtime.block_on(cli::attack(&session, flag)),
        Commands::Console => runtime.block_on(cli::console(&session)),
        Commands::Watch { interval_ms, count } => {
            runtime.block_on(cli::watch(&session, interval_ms, count))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["quantum_slots"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "quantum_slots",
            "spin",
            "--flag",
            "true",
            "--flag-param",
            "entangled",
            "--base-url",
            "http://example.test:9000",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Spin { flag: Some(true) })));
        assert_eq!(cli.global.flag_param, Some(FlagParam::Entangled));
        assert_eq!(cli.global.base_url.as_deref(), Some("http://example.test:9000"));
    }

    #[test]
    fn watch_count_must_be_positive() {
        assert!(Cli::try_parse_from(["quantum_slots", "watch", "--count", "0"]).is_err());
        let cli = Cli::try_parse_from(["quantum_slots", "watch", "--count", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Watch {
                count: Some(3),
                interval_ms: None
            })
        ));
    }

    #[test]
    fn unknown_flag_param_is_rejected() {
        assert!(Cli::try_parse_from(["quantum_slots", "--flag-param", "superposition"]).is_err());
    }
}
