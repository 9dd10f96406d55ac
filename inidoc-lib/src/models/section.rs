use std::fmt::Display;

use crate::{LINE_ENDING, models::entry::IniEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    pub(crate) name: String,
    pub(crate) entries: Vec<IniEntry>,
}

impl IniSection {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_value_by_key(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find_map(|entry| if entry.key == key { Some(entry.value.as_str()) } else { None })
    }

    pub fn entries(&self) -> &[IniEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrites an existing key in place, otherwise appends.
    pub(crate) fn set_value(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.value = value,
            None => self.entries.push(IniEntry { key, value }),
        }
    }

    pub(crate) fn remove_key(&mut self, key: &str) -> Option<IniEntry> {
        let index = self.entries.iter().position(|entry| entry.key == key)?;
        Some(self.entries.remove(index))
    }

    pub(crate) fn merge(&mut self, other: IniSection) {
        for entry in other.entries {
            self.set_value(entry.key, entry.value);
        }
    }

    pub(crate) fn sort_entries(&mut self) {
        self.entries.sort_by(|a, b| a.key.cmp(&b.key));
    }
}

impl Display for IniSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]{LINE_ENDING}", self.name)?;
        for entry in self.entries.iter() {
            write!(f, "{entry}{LINE_ENDING}")?;
        }
        write!(f, "{LINE_ENDING}")
    }
}

#[cfg(test)]
mod tests {
    use super::IniSection;

    fn section() -> IniSection {
        let mut section = IniSection::new("General");
        section.set_value("MagazineName".into(), "magazine.mgd".into());
        section.set_value("LeadFrameName".into(), "leadframe.lfd".into());
        section
    }

    #[test]
    fn set_value_overwrites_in_place() {
        let mut section = section();

        section.set_value("MagazineName".into(), "other.mgd".into());

        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["MagazineName", "LeadFrameName"]);
        assert_eq!(section.get_value_by_key("MagazineName"), Some("other.mgd"));
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let section = section();

        assert_eq!(section.get_value_by_key("magazinename"), None);
    }

    #[test]
    fn remove_key_keeps_remaining_order() {
        let mut section = section();
        section.set_value("MagazinePath".into(), "C:\\magazine.mgd".into());

        let removed = section.remove_key("LeadFrameName").unwrap();

        assert_eq!(removed.value, "leadframe.lfd");
        assert_eq!(section.keys().collect::<Vec<_>>(), vec!["MagazineName", "MagazinePath"]);
        assert!(section.remove_key("LeadFrameName").is_none());
    }

    #[test]
    fn display_terminates_with_blank_line() {
        assert_eq!(
            section().to_string(),
            "[General]\r\nMagazineName=magazine.mgd\r\nLeadFrameName=leadframe.lfd\r\n\r\n"
        );
        assert_eq!(IniSection::new("Empty").to_string(), "[Empty]\r\n\r\n");
    }
}
