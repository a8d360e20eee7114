//! Template rendering
//!
//! A template is a text file whose first `# ` comment line names the file
//! the rendered result is written to. Placeholders have the form
//! `@@name@@` and are replaced literally, in the order given.

use crate::error::SetupError;
use crate::system::System;
use anyhow::{Context as _, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Prefix of the comment line prepended to every rendered file
pub const STAMP_PREFIX: &str = "# modified by linuxmuster-mail at ";

/// Marker of the destination-path header line
const HEADER_MARKER: &str = "# ";

/// Pattern of a placeholder left over after substitution
#[expect(clippy::expect_used, reason = "The pattern is a constant")]
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@@[A-Za-z0-9_]+@@").expect("valid placeholder pattern"));

/// A template whose rendered content is also written under other names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateCopy {
    /// File name of the template
    pub template: &'static str,
    /// Sibling file names next to the destination that get the same content
    pub copies: &'static [&'static str],
}

/// The LDAP lookup maps for users, groups and aliases share one template
pub const LDAP_COPIES: TemplateCopy = TemplateCopy {
    template: "ldap-users.cf",
    copies: &["ldap-groups.cf", "ldap-aliases.cf"],
};

/// Result of rendering one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub template: PathBuf,
    pub output: PathBuf,
    pub copies: Vec<PathBuf>,
    pub unresolved: Vec<String>,
}

/// Current local time in the stamp format (`YYYYmmddHHMMSS`)
#[must_use]
#[inline]
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Wrap a parameter name into its placeholder token
#[must_use]
#[inline]
pub fn placeholder(name: &str) -> String {
    format!("@@{name}@@")
}

/// Extract the destination path from the first `# ` comment line
///
/// # Errors
///
/// Returns `SetupError::MissingHeader` if no line starts with `# ` or the
/// first such line names an empty path.
#[inline]
pub fn destination_path(template: &Path, content: &str) -> Result<PathBuf, SetupError> {
    let header = content
        .lines()
        .find_map(|line| line.strip_prefix(HEADER_MARKER))
        .ok_or_else(|| SetupError::missing_header(template))?;

    let path = header.trim();
    if path.is_empty() {
        return Err(SetupError::missing_header(template));
    }
    Ok(PathBuf::from(path))
}

/// Replace every `@@name@@` token with its value, in the given order
#[must_use]
#[inline]
pub fn substitute(content: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(content.to_owned(), |text, (name, value)| {
            text.replace(&placeholder(name), value)
        })
}

/// Placeholder tokens still present in `content`, in order of appearance
#[must_use]
#[inline]
pub fn unresolved_placeholders(content: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for token in PLACEHOLDER_PATTERN.find_iter(content) {
        if !found.iter().any(|t| t == token.as_str()) {
            found.push(token.as_str().to_owned());
        }
    }
    found
}

/// Render a single template and write it to its destination
///
/// # Errors
///
/// Returns an error if:
/// - The template cannot be read
/// - The template has no destination-path header
/// - The output or one of its copies cannot be written
#[inline]
pub fn render_template(
    system: &dyn System,
    template: &Path,
    replacements: &[(&str, &str)],
    stamp: &str,
    copies: &[TemplateCopy],
) -> Result<RenderedFile> {
    let content = system.read_to_string(template).with_context(|| SetupError::TemplateRead {
        path: template.to_path_buf(),
    })?;

    let output = destination_path(template, &content)?;
    let rendered = substitute(&content, replacements);

    let unresolved = unresolved_placeholders(&rendered);
    if !unresolved.is_empty() {
        warn!(
            "{} leaves placeholders unresolved: {}",
            template.display(),
            unresolved.join(", ")
        );
    }

    let rendered = format!("{STAMP_PREFIX}{stamp}\n{rendered}");
    write_output(system, &output, &rendered)?;
    debug!("{} -> {}", template.display(), output.display());

    let template_name = template.file_name().and_then(|name| name.to_str());
    let mut copy_paths = Vec::new();
    for copy in copies.iter().filter(|c| Some(c.template) == template_name) {
        for name in copy.copies {
            let copy_path = output.with_file_name(name);
            write_output(system, &copy_path, &rendered)?;
            debug!("{} -> {}", template.display(), copy_path.display());
            copy_paths.push(copy_path);
        }
    }

    Ok(RenderedFile {
        template: template.to_path_buf(),
        output,
        copies: copy_paths,
        unresolved,
    })
}

/// Render every file of a template directory, in file name order
///
/// Stops at the first failing template; files written before it stay.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or any template
/// fails to render.
#[inline]
pub fn render_directory(
    system: &dyn System,
    template_dir: &Path,
    replacements: &[(&str, &str)],
    stamp: &str,
    copies: &[TemplateCopy],
) -> Result<Vec<RenderedFile>> {
    let mut entries = system.read_dir(template_dir).with_context(|| {
        SetupError::filesystem(format!(
            "Cannot list template directory {}",
            template_dir.display()
        ))
    })?;
    entries.sort();

    let mut rendered = Vec::new();
    for entry in entries {
        if !system.is_file(&entry) {
            debug!("Skipping non-file template entry: {}", entry.display());
            continue;
        }
        rendered.push(render_template(system, &entry, replacements, stamp, copies)?);
    }

    info!(
        "Rendered {} templates from {}",
        rendered.len(),
        template_dir.display()
    );
    Ok(rendered)
}

fn write_output(system: &dyn System, path: &Path, content: &str) -> Result<()> {
    system
        .write(path, content.as_bytes())
        .with_context(|| SetupError::TemplateWrite {
            path: path.to_path_buf(),
        })
}
