//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser};

use crate::commands;
use crate::domain::RunoverConfig;
use crate::infra::{TokioShellRunner, YamlConfigStore, ZabbixClient, logging};

/// Options shared by both binaries.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Config file [default: $RUNOVER_CONFIG or ~/.runover/config.yaml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append log messages to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log debug messages (overridden by RUNOVER_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load the config file and install the log sink.
    ///
    /// The sink is installed even when the config cannot be loaded, so the
    /// caller can report that failure through it.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid or the log file cannot
    /// be opened.
    pub fn init(&self) -> Result<RunoverConfig> {
        let config = YamlConfigStore::new(self.config.clone()).load();
        let log_file = self
            .log_file
            .clone()
            .or_else(|| config.as_ref().ok().and_then(|c| c.log_file.clone()));
        logging::init(log_file.as_deref(), self.verbose)?;
        config
    }
}

/// Run a command over a list of monitored hosts and summarise the results
#[derive(Parser, Debug)]
#[command(name = "runover", version, arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub run: commands::run::RunArgs,

    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// Execute the fan-out run.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or logging cannot be set up.
    pub async fn run(self) -> Result<ExitCode> {
        let config = self.global.init()?;
        let runner = TokioShellRunner::new(self.run.shell(&config));
        commands::run::run(&self.run, &config, &runner).await
    }
}

/// Print the hosts of monitoring inventory host groups
#[derive(Parser, Debug)]
#[command(name = "gethosts", version, arg_required_else_help = true)]
pub struct GetHostsCli {
    #[command(flatten)]
    pub lookup: commands::gethosts::GetHostsArgs,

    #[command(flatten)]
    pub global: GlobalArgs,
}

impl GetHostsCli {
    /// Connect to the inventory and print the host list.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, login or the lookup fails.
    pub fn run(self) -> Result<()> {
        let config = self.global.init()?;
        let client = ZabbixClient::connect(&config.inventory)?;
        commands::gethosts::run(&self.lookup, &client)
    }
}

/// Report a fatal error through the log sink, or on stderr if the sink could
/// not be installed.
pub fn report_error(error: &anyhow::Error) {
    if tracing::dispatcher::has_been_set() {
        tracing::error!("{error:#}");
    } else {
        eprintln!("Error: {error:#}");
    }
}
