use crate::{
    IniError,
    models::{IniDocument, IniEntry, IniSection, check_entry, check_section_name},
};

/// Collects the entries of one named section. A repeated key overwrites the
/// earlier value without moving it.
#[derive(Debug)]
pub struct IniSectionBuilder {
    section: IniSection,
}

impl IniSectionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { section: IniSection::new(name) }
    }

    pub fn add_entry(mut self, entry: IniEntry) -> Self {
        self.section.set_value(entry.key, entry.value);
        self
    }

    pub fn add_key_value_pair(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_entry(IniEntry::new(key, value))
    }

    /// Fails when the section name or any entry could not survive a save and reload.
    pub fn build(self) -> Result<IniSection, IniError> {
        check_section_name(&self.section.name)?;
        for entry in self.section.entries.iter() {
            check_entry(&self.section.name, &entry.key, &entry.value)?;
        }
        Ok(self.section)
    }
}

#[derive(Debug, Default)]
pub struct IniDocumentBuilder {
    document: IniDocument,
}

impl IniDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `section`, or merges it into an earlier section with the same name.
    pub fn new_section(mut self, section: IniSection) -> Self {
        self.document.insert_section(section);
        self
    }

    pub fn build(self) -> IniDocument {
        self.document
    }
}
