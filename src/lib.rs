//! `linuxmuster-mail` - setup tool for the linuxmuster.net mail server appliance
//!
//! This library renders the mail server and network configuration from
//! `@@placeholder@@` templates, prepares permissions and runs the external
//! tools (`docker`, `systemctl`, `ssh-keygen`) that finish provisioning.

pub mod cli;
pub mod config;
pub mod error;
pub mod network;
pub mod operations;
pub mod prompt;
pub mod system;

use anyhow::Result;
use cli::{Args, Mode};
use config::InstallerConfig;
use error::SetupError;
use operations::commands::run_unchecked;
use operations::mail_setup::MailSetup;
use operations::network_setup::NetworkSetup;
use prompt::Prompter;
use system::System;
use tracing::info;

/// Main entry point for the linuxmuster-mail library
///
/// Runs the selected setup flow and, after success, reboots when asked to.
///
/// # Errors
///
/// Returns the first failing setup step's error.
pub fn run(
    args: &Args,
    config: &InstallerConfig,
    system: &dyn System,
    prompter: &dyn Prompter,
) -> Result<()> {
    let mode = args
        .mode()
        .ok_or_else(|| SetupError::configuration("Either --setup or --network is required"))?;

    match mode {
        Mode::Mail { config: setup_file } => {
            if !system.is_file(&setup_file) {
                return Err(SetupError::configuration(format!(
                    "Setup file not found: {}",
                    setup_file.display()
                ))
                .into());
            }
            MailSetup::new(config, system).execute(&setup_file)?;
        }
        Mode::Network => {
            NetworkSetup::new(config, system, prompter).execute()?;
        }
    }

    info!("Script finished successfully!");
    if args.reboot {
        info!("Rebooting ...");
        run_unchecked(system, &config.reboot_command, &[]);
    } else {
        info!("Note: You have to reboot the system to make the changes effective.");
    }

    Ok(())
}
