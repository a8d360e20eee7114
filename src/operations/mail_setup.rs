//! Mail server setup
//!
//! Prepares certificate and data directory permissions, renders the docker
//! templates from the setup file values, pulls the mail server image and
//! enables its service.

use crate::config::validation::is_valid_domainname;
use crate::config::{InstallerConfig, SetupParams};
use crate::error::SetupError;
use crate::operations::commands::{run_checked, run_unchecked};
use crate::operations::render::{LDAP_COPIES, RenderedFile, render_directory, timestamp};
use crate::system::System;
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::{info, warn};

/// Permission bits of the certificate key
pub const MAIL_KEY_MODE: u32 = 0o750;

/// Permission bits of the per-domain mail data directory
pub const MAILDATA_MODE: u32 = 0o770;

/// Coordinates the mail server setup
#[non_exhaustive]
pub struct MailSetup<'src> {
    config: &'src InstallerConfig,
    system: &'src dyn System,
}

impl<'src> MailSetup<'src> {
    /// Create a new mail setup
    #[must_use]
    #[inline]
    pub fn new(config: &'src InstallerConfig, system: &'src dyn System) -> Self {
        Self { config, system }
    }

    /// Run every setup step, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The certificate key is missing (nothing else is touched)
    /// - The setup file cannot be read or parsed, or names an invalid domain
    /// - The mail data directory cannot be created or its mode set
    /// - A template cannot be rendered
    /// - Pulling the image or enabling the service fails
    #[inline]
    pub fn execute(&self, setup_file: &Path) -> Result<Vec<RenderedFile>> {
        info!("### linuxmuster-mail: mailserver setup");

        self.prepare_certificate()?;

        info!("Reading setup data ...");
        let params = SetupParams::load(self.system, setup_file)?;
        if !is_valid_domainname(&params.domainname) {
            return Err(SetupError::configuration(format!(
                "Invalid domainname '{}' in setup file",
                params.domainname
            ))
            .into());
        }
        let smtpauth = params.smtp_auth();

        self.prepare_maildata(&params.domainname)?;

        info!("Writing docker configuration ...");
        let replacements = [
            ("serverip", params.serverip.as_str()),
            ("basedn", params.basedn.as_str()),
            ("binduserpw", params.binduserpw.as_str()),
            ("domainname", params.domainname.as_str()),
            ("smtprelay", params.smtprelay.as_str()),
            ("smtpauth", smtpauth.as_str()),
        ];
        let rendered = render_directory(
            self.system,
            &self.config.docker_template_dir(),
            &replacements,
            &timestamp(),
            &[LDAP_COPIES],
        )?;

        info!("Pulling docker image {} ...", self.config.docker_image);
        run_checked(self.system, "docker", &["pull", self.config.docker_image.as_str()])?;

        info!("Enabling {} ...", self.config.service_unit);
        run_checked(self.system, "systemctl", &["enable", self.config.service_unit.as_str()])?;

        Ok(rendered)
    }

    /// Check the certificate key and hand it to the docker group
    fn prepare_certificate(&self) -> Result<()> {
        let key = &self.config.mail_key;
        if !self.system.is_file(key) {
            return Err(SetupError::CertificateMissing { path: key.clone() }.into());
        }
        info!("Certificate file {} found!", key.display());

        let key_str = key.to_string_lossy();
        run_unchecked(self.system, "chgrp", &[self.config.docker_group.as_str(), &*key_str]);
        if let Err(err) = self.system.set_mode(key, MAIL_KEY_MODE) {
            warn!("Cannot set permissions of {}: {}", key.display(), err);
        }
        Ok(())
    }

    /// Create the per-domain mail data directory owned by docker
    fn prepare_maildata(&self, domainname: &str) -> Result<()> {
        let maildata = self.config.maildata_dir(domainname);
        self.system.create_dir_all(&maildata).with_context(|| {
            SetupError::filesystem(format!("Cannot create {}", maildata.display()))
        })?;

        let owner = format!("{0}:{0}", self.config.docker_group);
        let maildata_str = maildata.to_string_lossy();
        run_unchecked(self.system, "chown", &[owner.as_str(), &*maildata_str]);

        self.system
            .set_mode(&maildata, MAILDATA_MODE)
            .with_context(|| {
                SetupError::filesystem(format!(
                    "Cannot set permissions of {}",
                    maildata.display()
                ))
            })
    }
}
