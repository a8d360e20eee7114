use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Command-line arguments for linuxmuster-mail
#[derive(Parser, Debug, Clone)]
#[command(name = "linuxmuster-mail")]
#[command(about = "Setup tool for the linuxmuster.net mail server appliance")]
#[command(long_about = None)]
#[command(version)]
#[command(group(ArgGroup::new("mode").required(true).args(["setup", "network"])))]
pub struct Args {
    /// Path to ini file with setup values (mandatory with --setup)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start mailserver setup (needs --config)
    #[arg(short, long, requires = "config", conflicts_with = "network")]
    pub setup: bool,

    /// Interactive network setup (not with --setup)
    #[arg(short, long)]
    pub network: bool,

    /// Reboot system after successful setup
    #[arg(short, long)]
    pub reboot: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Setup flow selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Mail server setup from a setup file
    Mail { config: PathBuf },
    /// Interactive network setup
    Network,
}

impl Args {
    /// The setup flow to run
    ///
    /// Clap guarantees exactly one mode and a config file for mail setup;
    /// `None` is only returned for arguments built by hand.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        match (self.setup, self.network, self.config.as_ref()) {
            (true, false, Some(config)) => Some(Mode::Mail {
                config: config.clone(),
            }),
            (false, true, _) => Some(Mode::Network),
            _ => None,
        }
    }
}
