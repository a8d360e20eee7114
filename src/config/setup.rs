//! Setup parameters read from the `[setup]` section of the setup file

use crate::config::ini::{KvSection, parse_kv_sections_from_str};
use crate::error::SetupError;
use crate::system::System;
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::debug;

/// Name of the INI section holding the setup values
pub const SETUP_SECTION: &str = "setup";

/// Mail server setup values
///
/// Every field is required in the setup file but may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupParams {
    pub domainname: String,
    pub serverip: String,
    pub firewallip: String,
    pub mailip: String,
    pub binduserpw: String,
    pub basedn: String,
    pub smtprelay: String,
    pub smtpuser: String,
    pub smtppw: String,
}

impl SetupParams {
    /// Load setup values from an INI file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file is not valid INI
    /// - The `[setup]` section or one of its keys is missing
    pub fn load(system: &dyn System, path: &Path) -> Result<Self> {
        if !system.is_file(path) {
            return Err(SetupError::configuration(format!(
                "Setup file not found: {}",
                path.display()
            ))
            .into());
        }

        let content = system
            .read_to_string(path)
            .map_err(|e| {
                SetupError::configuration(format!("Cannot read {}: {e}", path.display()))
            })?;

        Self::from_ini_str(&content)
            .with_context(|| format!("Invalid setup file: {}", path.display()))
    }

    /// Parse setup values from INI text
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse`, `MissingSection` or `MissingKey`.
    pub fn from_ini_str(content: &str) -> Result<Self, SetupError> {
        let sections = parse_kv_sections_from_str(content)?;
        let section = sections
            .iter()
            .find(|s| s.header == SETUP_SECTION)
            .ok_or_else(|| SetupError::MissingSection {
                section: SETUP_SECTION.to_owned(),
            })?;

        let params = Self {
            domainname: required(section, "domainname")?,
            serverip: required(section, "serverip")?,
            firewallip: required(section, "firewallip")?,
            mailip: required(section, "mailip")?,
            binduserpw: required(section, "binduserpw")?,
            basedn: required(section, "basedn")?,
            smtprelay: required(section, "smtprelay")?,
            smtpuser: required(section, "smtpuser")?,
            smtppw: required(section, "smtppw")?,
        };
        debug!(
            "Setup values for {} (server {}, mail {})",
            params.domainname, params.serverip, params.mailip
        );
        Ok(params)
    }

    /// Credentials for the SMTP relay in `user:password` form
    ///
    /// Empty when either the user or the password is empty.
    #[must_use]
    pub fn smtp_auth(&self) -> String {
        if self.smtpuser.is_empty() || self.smtppw.is_empty() {
            String::new()
        } else {
            format!("{}:{}", self.smtpuser, self.smtppw)
        }
    }
}

fn required(section: &KvSection, key: &str) -> Result<String, SetupError> {
    section
        .get(key)
        .map(str::to_owned)
        .ok_or_else(|| SetupError::missing_key(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "\
[setup]
domainname = linuxmuster.lan
serverip = 10.0.0.1
firewallip = 10.0.0.254
mailip = 10.0.0.3
binduserpw = Muster!
basedn = dc=linuxmuster,dc=lan
smtprelay = mail.provider.de
smtpuser = alice
smtppw = secret
";

    #[test]
    fn test_parse_all_keys() {
        let params = SetupParams::from_ini_str(FULL).unwrap();
        assert_eq!(params.domainname, "linuxmuster.lan");
        assert_eq!(params.basedn, "dc=linuxmuster,dc=lan");
        assert_eq!(params.smtp_auth(), "alice:secret");
    }

    #[test]
    fn test_smtp_auth_empty_when_user_or_password_blank() {
        let mut params = SetupParams::from_ini_str(FULL).unwrap();
        params.smtppw.clear();
        assert_eq!(params.smtp_auth(), "");

        params.smtppw = "secret".to_owned();
        params.smtpuser.clear();
        assert_eq!(params.smtp_auth(), "");
    }

    #[test]
    fn test_missing_key() {
        let content = FULL.replace("smtppw = secret\n", "");
        let err = SetupParams::from_ini_str(&content).unwrap_err();
        assert!(matches!(err, SetupError::MissingKey { ref key } if key == "smtppw"));
    }

    #[test]
    fn test_missing_section() {
        let content = FULL.replace("[setup]", "[mail]");
        let err = SetupParams::from_ini_str(&content).unwrap_err();
        assert!(matches!(err, SetupError::MissingSection { .. }));
    }

    #[test]
    fn test_malformed_ini() {
        let err = SetupParams::from_ini_str("domainname = x\n").unwrap_err();
        assert!(matches!(err, SetupError::ConfigParse { .. }));
    }
}
