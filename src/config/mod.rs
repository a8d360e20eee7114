//! Configuration management module
//!
//! Holds the installer's fixed paths and names, the INI reader and the
//! setup parameters loaded from it, and the input validators.

pub mod ini;
pub mod setup;
pub mod validation;

pub use setup::SetupParams;

use std::path::PathBuf;

/// Paths, names and external resources used by the setup steps
///
/// `Default` yields the values of an installed appliance; tests point the
/// paths somewhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Hostname written during network setup
    pub hostname: String,

    /// Private key of the mail server certificate
    pub mail_key: PathBuf,

    /// Root of the template tree (`docker/` and `network/` below it)
    pub template_dir: PathBuf,

    /// Docker data directory of the mail container
    pub docker_dir: PathBuf,

    /// Mail server image to pull
    pub docker_image: String,

    /// Owner user and group of docker resources
    pub docker_group: String,

    /// Systemd unit enabled at the end of mail setup
    pub service_unit: String,

    /// File receiving the static hostname
    pub hostname_file: PathBuf,

    /// Directory holding the SSH host keys
    pub ssh_dir: PathBuf,

    /// Key algorithms regenerated during network setup
    pub ssh_key_types: Vec<String>,

    /// Command used to reboot after a successful run
    pub reboot_command: String,
}

impl InstallerConfig {
    /// Directory of the mail server templates
    #[must_use]
    #[inline]
    pub fn docker_template_dir(&self) -> PathBuf {
        self.template_dir.join("docker")
    }

    /// Directory of the network configuration templates
    #[must_use]
    #[inline]
    pub fn network_template_dir(&self) -> PathBuf {
        self.template_dir.join("network")
    }

    /// Per-domain mail data directory
    #[must_use]
    #[inline]
    pub fn maildata_dir(&self, domainname: &str) -> PathBuf {
        self.docker_dir.join("maildata").join(domainname)
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            hostname: "mail".to_owned(),
            mail_key: PathBuf::from("/etc/linuxmuster/ssl/mail.key.pem"),
            template_dir: PathBuf::from("/usr/share/linuxmuster-mail/templates"),
            docker_dir: PathBuf::from("/srv/docker/linuxmuster-mail"),
            docker_image: "tvial/docker-mailserver:latest".to_owned(),
            docker_group: "docker".to_owned(),
            service_unit: "linuxmuster-mail.service".to_owned(),
            hostname_file: PathBuf::from("/etc/hostname"),
            ssh_dir: PathBuf::from("/etc/ssh"),
            ssh_key_types: ["dsa", "ecdsa", "ed25519", "rsa"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            reboot_command: "/sbin/reboot".to_owned(),
        }
    }
}
