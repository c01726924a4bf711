use crate::memory_store::StoreEngine;
use crate::store::builder::StoreConfig;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ClockSource {
    /// read the system clock on every operation
    System,
    /// system clock cached once per second
    Coarse,
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "docstore-shell - versioned document store with CAS and TTL, driven from stdin"
)]
struct Cli {
    /// Sets the level of verbosity
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// storage engine
    #[arg(short, long, value_enum, default_value_t = StoreEngine::DashMap)]
    engine: StoreEngine,

    /// time source used for expiry
    #[arg(short, long, value_enum, default_value_t = ClockSource::Coarse)]
    clock: ClockSource,
}

pub struct ShellArgs {
    pub store_config: StoreConfig,
    pub log_level: tracing::Level,
    pub clock: ClockSource,
}

impl ShellArgs {
    pub fn from_args<I, T>(args: I) -> Result<ShellArgs, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;

        // Vary the output based on how many times the user used the "verbose" flag
        let log_level = match cli.verbose {
            0 => tracing::Level::ERROR,
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            3 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        Ok(ShellArgs {
            store_config: StoreConfig::new(cli.engine),
            log_level,
            clock: cli.clock,
        })
    }
}
