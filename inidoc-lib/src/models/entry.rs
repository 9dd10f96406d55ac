use std::fmt::Display;

use regex::Captures;

use crate::{ENTRY_KEY_GROUP_NAME, ENTRY_VALUE_GROUP_NAME, IniError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniEntry {
    pub key: String,
    pub value: String,
}

impl IniEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

impl Display for IniEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl<'content> TryFrom<Captures<'content>> for IniEntry {
    type Error = IniError;

    fn try_from(captures: Captures<'content>) -> Result<Self, Self::Error> {
        let key = captures
            .name(ENTRY_KEY_GROUP_NAME)
            .ok_or(IniError::RegexCaptureGroupNotFound(ENTRY_KEY_GROUP_NAME))?
            .as_str();

        let value = captures
            .name(ENTRY_VALUE_GROUP_NAME)
            .ok_or(IniError::RegexCaptureGroupNotFound(ENTRY_VALUE_GROUP_NAME))?
            .as_str();

        Ok(Self::new(key, value))
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\r', '\n'])
}

pub(crate) fn check_section_name(name: &str) -> Result<(), IniError> {
    if name.is_empty() || has_line_break(name) {
        return Err(IniError::InvalidSectionName(name.to_owned()));
    }
    Ok(())
}

/// Rejects anything that would render to a line the parser reads back differently.
pub(crate) fn check_entry(section: &str, key: &str, value: &str) -> Result<(), IniError> {
    if key.is_empty() || key.contains('=') || has_line_break(key) {
        return Err(IniError::InvalidKey { section: section.to_owned(), key: key.to_owned() });
    }

    // `[k=v]` would come back as a section header.
    if has_line_break(value) || (key.starts_with('[') && value.ends_with(']')) {
        return Err(IniError::InvalidValue { section: section.to_owned(), key: key.to_owned() });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_entry, check_section_name};
    use crate::IniError;

    #[test]
    fn entry_displays_without_spacing() {
        let entry = super::IniEntry::new("MagazinePath", "C:\\magazine.mgd");

        assert_eq!(entry.to_string(), "MagazinePath=C:\\magazine.mgd");
    }

    #[test]
    fn section_names_must_be_single_line_and_non_empty() {
        assert!(check_section_name("General").is_ok());
        assert!(check_section_name("with spaces = fine").is_ok());
        assert!(matches!(check_section_name(""), Err(IniError::InvalidSectionName(_))));
        assert!(matches!(check_section_name("a\r\nb"), Err(IniError::InvalidSectionName(_))));
    }

    #[test]
    fn keys_reject_delimiters() {
        assert!(check_entry("s", "key", "a=b=c").is_ok());
        assert!(matches!(check_entry("s", "", "v"), Err(IniError::InvalidKey { .. })));
        assert!(matches!(check_entry("s", "a=b", "v"), Err(IniError::InvalidKey { .. })));
        assert!(matches!(check_entry("s", "a\nb", "v"), Err(IniError::InvalidKey { .. })));
    }

    #[test]
    fn values_reject_line_breaks_and_header_lookalikes() {
        assert!(check_entry("s", "[key", "value").is_ok());
        assert!(check_entry("s", "key", "[value]").is_ok());
        assert!(matches!(check_entry("s", "key", "line\r"), Err(IniError::InvalidValue { .. })));
        assert!(matches!(check_entry("s", "[key", "value]"), Err(IniError::InvalidValue { .. })));
    }
}
