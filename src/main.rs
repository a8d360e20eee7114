//! # linuxmuster-mail
//!
//! Setup tool for the dockerized mail server of a linuxmuster.net school
//! network.
//!
//! ## Usage
//!
//! **Mail server setup from a setup file:**
//! ```sh
//! linuxmuster-mail --setup --config /tmp/setup.ini --reboot
//! ```
//!
//! **Interactive network setup:**
//! ```sh
//! linuxmuster-mail --network
//! ```
//!
//! Exit codes: 0 on success, 1 when a setup step fails, 2 on invalid
//! arguments.

use clap::Parser as _;
use linuxmuster_mail::cli::Args;
use linuxmuster_mail::config::InstallerConfig;
use linuxmuster_mail::error::SetupError;
use linuxmuster_mail::prompt::TermPrompter;
use linuxmuster_mail::system::RealSystem;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_target(false).with_env_filter(filter).init();

    let system = RealSystem::new();
    let config = InstallerConfig::default();

    match linuxmuster_mail::run(&args, &config, &system, &TermPrompter) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            error!("Script finished with error!");
            std::process::exit(
                err.downcast_ref::<SetupError>()
                    .map_or(1, SetupError::exit_code),
            );
        }
    }
}
