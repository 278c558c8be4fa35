//! Domain name helpers.
//!
//! Names are kept as text in presentation form. Every stored or compared
//! name is fully qualified (ends with `.`); owner names are also lower-cased
//! so lookups are case-insensitive.

use crate::DomainError;

const MAX_LABEL_LEN: usize = 63;
const MAX_WIRE_LEN: usize = 255;

/// Validates `name` and appends the root label if missing. Case is preserved.
pub fn absolutify(name: &str) -> Result<String, DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidDomainName("empty name".to_string()));
    }
    if name == "." {
        return Ok(".".to_string());
    }

    let relative = name.strip_suffix('.').unwrap_or(name);
    let mut wire_len = 1;

    for label in relative.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "{}: empty label",
                name
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "{}: label longer than {} bytes",
                name, MAX_LABEL_LEN
            )));
        }
        if let Some(c) = label.chars().find(|c| !c.is_ascii_graphic()) {
            return Err(DomainError::InvalidDomainName(format!(
                "{}: invalid character {:?}",
                name, c
            )));
        }
        wire_len += label.len() + 1;
    }

    if wire_len > MAX_WIRE_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "{}: longer than {} bytes",
            name, MAX_WIRE_LEN
        )));
    }

    Ok(format!("{}.", relative))
}

/// Canonical lookup form: validated, fully qualified and lower-cased.
pub fn qualify(name: &str) -> Result<String, DomainError> {
    absolutify(name).map(|n| n.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_appends_root_and_lowercases() {
        assert_eq!(qualify("Example.COM").unwrap(), "example.com.");
        assert_eq!(qualify("example.com.").unwrap(), "example.com.");
    }

    #[test]
    fn test_absolutify_preserves_case() {
        assert_eq!(absolutify("Mail.Example.com").unwrap(), "Mail.Example.com.");
    }

    #[test]
    fn test_root_name() {
        assert_eq!(qualify(".").unwrap(), ".");
    }

    #[test]
    fn test_rejects_empty_labels() {
        assert!(qualify("").is_err());
        assert!(qualify("a..b").is_err());
        assert!(qualify(".example.com").is_err());
    }

    #[test]
    fn test_rejects_long_label() {
        let label = "a".repeat(64);
        assert!(qualify(&format!("{}.com", label)).is_err());
        assert!(qualify(&format!("{}.com", &label[..63])).is_ok());
    }

    #[test]
    fn test_rejects_long_name() {
        let name = vec!["abcdefghi"; 26].join(".");
        assert!(qualify(&name).is_err());
    }

    #[test]
    fn test_rejects_whitespace() {
        assert!(qualify("exa mple.com").is_err());
    }
}
