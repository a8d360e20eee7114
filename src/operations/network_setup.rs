//! Interactive network setup
//!
//! Asks for interface, address, name server, gateway and domain, writes
//! the network configuration from templates, sets the hostname and
//! regenerates the SSH host keys.

use crate::config::InstallerConfig;
use crate::config::validation::{is_valid_domainname, is_valid_host_ipv4};
use crate::error::SetupError;
use crate::network::{Ipv4Cidr, default_interface, detect_interfaces};
use crate::operations::render::{RenderedFile, render_directory, timestamp};
use crate::operations::ssh_keys::{generate_host_keys, remove_host_keys};
use crate::prompt::Prompter;
use crate::system::System;
use anyhow::{Context as _, Result};
use std::net::Ipv4Addr;
use tracing::{debug, info, warn};

/// Address offered when nothing else is known
pub const DEFAULT_MAIL_CIDR: &str = "10.0.0.3/16";

/// Domain offered by default
pub const DEFAULT_DOMAINNAME: &str = "linuxmuster.lan";

/// Answers collected by the network setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSettings {
    pub iface: String,
    pub cidr: Ipv4Cidr,
    pub dnsip: String,
    pub gatewayip: String,
    pub domainname: String,
}

impl NetworkSettings {
    /// Placeholder values for the network templates
    #[must_use]
    pub fn replacements(&self) -> Vec<(&'static str, String)> {
        vec![
            ("iface", self.iface.clone()),
            ("mailip", self.cidr.address().to_string()),
            ("netmask", self.cidr.netmask().to_string()),
            ("network", self.cidr.network().to_string()),
            ("broadcast", self.cidr.broadcast().to_string()),
            ("gatewayip", self.gatewayip.clone()),
            ("dnsip", self.dnsip.clone()),
            ("domainname", self.domainname.clone()),
        ]
    }
}

/// Coordinates the network setup
#[non_exhaustive]
pub struct NetworkSetup<'src> {
    config: &'src InstallerConfig,
    system: &'src dyn System,
    prompter: &'src dyn Prompter,
}

impl<'src> NetworkSetup<'src> {
    /// Create a new network setup
    #[must_use]
    #[inline]
    pub fn new(
        config: &'src InstallerConfig,
        system: &'src dyn System,
        prompter: &'src dyn Prompter,
    ) -> Self {
        Self {
            config,
            system,
            prompter,
        }
    }

    /// Ask for the settings, then write configuration, hostname and host keys
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No network interface can be listed or no answer can be read
    /// - A network template cannot be rendered
    /// - The hostname file cannot be written
    /// - Host keys cannot be removed or generated
    #[inline]
    pub fn execute(&self) -> Result<NetworkSettings> {
        info!("### linuxmuster-mail: network setup");

        let settings = self.collect_settings()?;
        self.write_configuration(&settings)?;

        let removed = remove_host_keys(self.system, &self.config.ssh_dir)?;
        debug!("Removed {} old host key files", removed);
        generate_host_keys(self.system, &self.config.ssh_dir, &self.config.ssh_key_types)?;

        Ok(settings)
    }

    /// Ask every question until a valid answer is given
    ///
    /// # Errors
    ///
    /// Returns an error if interfaces cannot be detected or the prompter
    /// fails.
    pub fn collect_settings(&self) -> Result<NetworkSettings> {
        let interfaces = detect_interfaces(self.system)?;
        let default_iface = default_interface(self.system, &interfaces).unwrap_or_default();
        let iface = self.ask("Enter network interface to use", &default_iface, |answer| {
            interfaces.iter().any(|i| i == answer).then(|| answer.to_owned())
        })?;

        let cidr = self.ask(
            "Enter ip address with net or bitmask",
            DEFAULT_MAIL_CIDR,
            |answer| {
                answer
                    .parse::<Ipv4Cidr>()
                    .map_err(|err| warn!("{}", err))
                    .ok()
            },
        )?;
        debug!("Mail address: {}", cidr);

        let dnsip = self.ask(
            "Enter dns server ip address",
            &host_in_subnet(cidr.address(), 1),
            valid_host_ip,
        )?;

        let gatewayip = self.ask(
            "Enter gateway ip address",
            &host_in_subnet(cidr.address(), 254),
            valid_host_ip,
        )?;

        let domainname = self.ask("Enter domainname", DEFAULT_DOMAINNAME, |answer| {
            is_valid_domainname(answer).then(|| answer.to_owned())
        })?;

        Ok(NetworkSettings {
            iface,
            cidr,
            dnsip,
            gatewayip,
            domainname,
        })
    }

    /// Render the network templates and write the hostname file
    ///
    /// # Errors
    ///
    /// Returns an error if a template cannot be rendered or the hostname
    /// cannot be written.
    pub fn write_configuration(&self, settings: &NetworkSettings) -> Result<Vec<RenderedFile>> {
        info!("Writing network configuration ...");
        let values = settings.replacements();
        let replacements: Vec<(&str, &str)> = values
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();

        let rendered = render_directory(
            self.system,
            &self.config.network_template_dir(),
            &replacements,
            &timestamp(),
            &[],
        )?;

        let hostname_file = &self.config.hostname_file;
        self.system
            .write(hostname_file, format!("{}\n", self.config.hostname).as_bytes())
            .with_context(|| SetupError::TemplateWrite {
                path: hostname_file.clone(),
            })?;
        info!("Success!");

        Ok(rendered)
    }

    fn ask<T>(
        &self,
        prompt: &str,
        default: &str,
        accept: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let answer = self.prompter.input(prompt, default)?;
            if let Some(value) = accept(&answer) {
                return Ok(value);
            }
            warn!("Invalid entry!");
        }
    }
}

fn valid_host_ip(answer: &str) -> Option<String> {
    is_valid_host_ipv4(answer).then(|| answer.to_owned())
}

/// Address sharing the first three octets of `address` with `last` as the fourth
fn host_in_subnet(address: Ipv4Addr, last: u8) -> String {
    let [a, b, c, _] = address.octets();
    Ipv4Addr::new(a, b, c, last).to_string()
}
