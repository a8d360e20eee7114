//! SSH host key regeneration

use crate::error::SetupError;
use crate::operations::commands::run_checked;
use crate::system::System;
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Path of the private host key for `key_type`
#[must_use]
#[inline]
pub fn host_key_path(ssh_dir: &Path, key_type: &str) -> PathBuf {
    ssh_dir.join(format!("ssh_host_{key_type}_key"))
}

/// Delete every file in `ssh_dir` whose name contains `key`
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or a file cannot be
/// removed.
pub fn remove_host_keys(system: &dyn System, ssh_dir: &Path) -> Result<usize> {
    let entries = system
        .read_dir(ssh_dir)
        .with_context(|| format!("Failed to read directory: {}", ssh_dir.display()))?;

    let mut removed = 0;
    for entry in entries {
        let is_key = entry
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.contains("key"));
        if is_key && system.is_file(&entry) {
            system
                .remove_file(&entry)
                .with_context(|| format!("Failed to remove {}", entry.display()))?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Generate one passphrase-less host key per key type
///
/// Reports each key's outcome and keeps going after a failed key, so the
/// remaining key types are still generated.
///
/// # Errors
///
/// Returns `SetupError::Command` naming the failed key types if
/// `ssh-keygen` fails for any of them.
pub fn generate_host_keys(
    system: &dyn System,
    ssh_dir: &Path,
    key_types: &[String],
) -> Result<Vec<PathBuf>> {
    info!("Creating ssh host keys ...");
    let mut created = Vec::new();
    let mut failed: Vec<&str> = Vec::new();

    for key_type in key_types {
        let key_path = host_key_path(ssh_dir, key_type);
        let key_str = key_path.to_string_lossy();
        let result = run_checked(
            system,
            "ssh-keygen",
            &["-t", key_type.as_str(), "-f", &*key_str, "-N", ""],
        );
        match result {
            Ok(_) => {
                info!(" * {} host key: Success!", key_type);
                created.push(key_path);
            }
            Err(err) => {
                error!(" * {} host key: Failed!", key_type);
                debug!("{:#}", err);
                failed.push(key_type.as_str());
            }
        }
    }

    if !failed.is_empty() {
        return Err(SetupError::command(format!(
            "Failed to generate ssh host keys: {}",
            failed.join(", ")
        ))
        .into());
    }
    Ok(created)
}
