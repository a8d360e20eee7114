//! INI reader for setup files
//!
//! Supports the subset of INI the setup files use: `[section]` headers,
//! `key = value` or `key: value` entries, full-line comments starting with
//! `#` or `;`, and inline comments introduced by whitespace followed by `#`
//! or `;`. Keys are case-insensitive and stored lowercased. A doubled `%%`
//! in a value reads as a single `%`.

use crate::error::SetupError;

/// A key-value section of an INI file.
///
/// # Examples
///
/// ```
/// use linuxmuster_mail::config::ini::KvSection;
///
/// let section = KvSection {
///     header: "setup".to_owned(),
///     entries: vec![("domainname".to_owned(), "linuxmuster.lan".to_owned())],
/// };
/// assert_eq!(section.get("domainname"), Some("linuxmuster.lan"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvSection {
    /// The section name without brackets
    pub header: String,
    /// Key-value entries in file order
    pub entries: Vec<(String, String)>,
}

impl KvSection {
    /// Look up a value by (case-insensitive) key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse INI content into key-value sections.
///
/// ```
/// use linuxmuster_mail::config::ini::parse_kv_sections_from_str;
///
/// let sections = parse_kv_sections_from_str(
///     "[setup]\nDomainName = linuxmuster.lan ; school domain\nsmtpuser:\n"
/// ).unwrap();
/// assert_eq!(sections[0].get("domainname"), Some("linuxmuster.lan"));
/// assert_eq!(sections[0].get("smtpuser"), Some(""));
/// ```
///
/// # Errors
///
/// Returns `SetupError::ConfigParse` if:
/// - An entry appears outside of a section header
/// - A line is neither a header nor a `key = value` pair
/// - A section or a key within a section is repeated
pub fn parse_kv_sections_from_str(content: &str) -> Result<Vec<KvSection>, SetupError> {
    let mut sections: Vec<KvSection> = Vec::new();
    let mut current: Option<KvSection> = None;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if let Some(header) = parse_raw_header(strip_inline_comment(trimmed).trim_end()) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            if sections.iter().any(|s| s.header == header) {
                return Err(SetupError::parse(
                    line_num + 1,
                    format!("section [{header}] already exists"),
                ));
            }
            current = Some(KvSection {
                header,
                entries: Vec::new(),
            });
        } else if let Some(ref mut section) = current {
            let Some((key, value)) = parse_kv_line(trimmed) else {
                return Err(SetupError::parse(
                    line_num + 1,
                    format!("invalid key-value pair: {trimmed}"),
                ));
            };
            if section.entries.iter().any(|(k, _)| *k == key) {
                return Err(SetupError::parse(
                    line_num + 1,
                    format!("key '{key}' already exists in section [{}]", section.header),
                ));
            }
            section.entries.push((key, value));
        } else {
            return Err(SetupError::parse(
                line_num + 1,
                format!("entry outside of section: {trimmed}"),
            ));
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    Ok(sections)
}

fn parse_raw_header(line: &str) -> Option<String> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    (!inner.is_empty()).then(|| inner.to_owned())
}

fn parse_kv_line(line: &str) -> Option<(String, String)> {
    let delimiter = line.find(['=', ':'])?;
    let key = line[..delimiter].trim();
    if key.is_empty() {
        return None;
    }
    let value = strip_inline_comment(&line[delimiter + 1..]).trim();
    Some((key.to_lowercase(), value.replace("%%", "%")))
}

/// Cut the value at the first `#` or `;` preceded by whitespace
fn strip_inline_comment(value: &str) -> &str {
    let mut previous_is_space = false;
    for (index, ch) in value.char_indices() {
        if previous_is_space && (ch == '#' || ch == ';') {
            return &value[..index];
        }
        previous_is_space = ch.is_whitespace();
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_and_entries() {
        let content = "\
# setup values
[setup]
domainname = linuxmuster.lan
serverip: 10.0.0.1

[other]
key=value
";
        let sections = parse_kv_sections_from_str(content).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].header, "setup");
        assert_eq!(sections[0].get("serverip"), Some("10.0.0.1"));
        assert_eq!(sections[1].get("key"), Some("value"));
    }

    #[test]
    fn test_inline_comments_need_whitespace() {
        let sections =
            parse_kv_sections_from_str("[setup]\nsmtppw = se#cret ; comment\nbasedn = dc=x # c\n")
                .unwrap();
        assert_eq!(sections[0].get("smtppw"), Some("se#cret"));
        assert_eq!(sections[0].get("basedn"), Some("dc=x"));
    }

    #[test]
    fn test_header_with_trailing_comment() {
        let sections =
            parse_kv_sections_from_str("[setup] ; mail values
domainname = a
").unwrap();
        assert_eq!(sections[0].header, "setup");
        assert_eq!(sections[0].get("domainname"), Some("a"));
    }

    #[test]
    fn test_doubled_percent_reads_as_one() {
        let sections =
            parse_kv_sections_from_str("[setup]
binduserpw = Mu%%ster%1
").unwrap();
        assert_eq!(sections[0].get("binduserpw"), Some("Mu%ster%1"));
    }

    #[test]
    fn test_first_delimiter_splits() {
        let sections = parse_kv_sections_from_str("[setup]\nsmtprelay = mx.example.org:587\n")
            .unwrap();
        assert_eq!(sections[0].get("smtprelay"), Some("mx.example.org:587"));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let sections = parse_kv_sections_from_str("[setup]\nSMTPUser = alice\n").unwrap();
        assert_eq!(sections[0].get("smtpuser"), Some("alice"));
        assert_eq!(sections[0].get("SmtpUser"), Some("alice"));
    }

    #[test]
    fn test_entry_outside_section() {
        let err = parse_kv_sections_from_str("key = value\n").unwrap_err();
        assert!(matches!(err, SetupError::ConfigParse { line: 1, .. }));
    }

    #[test]
    fn test_line_without_delimiter() {
        let err = parse_kv_sections_from_str("[setup]\n\njustakey\n").unwrap_err();
        assert!(matches!(err, SetupError::ConfigParse { line: 3, .. }));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = parse_kv_sections_from_str("[setup]\na = 1\nA = 2\n").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let err = parse_kv_sections_from_str("[setup]\n[setup]\n").unwrap_err();
        assert!(err.to_string().contains("section [setup] already exists"));
    }
}
