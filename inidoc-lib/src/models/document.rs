use std::{
    fmt::Display,
    io::{Read, Write},
};

use crate::{
    IniError, IniValue,
    models::{check_entry, check_section_name, section::IniSection},
};

/// Ordered, in-memory INI document.
///
/// Sections and the properties inside them keep the order in which they were
/// first written or loaded until [`IniDocument::sort`] is called. Values are
/// stored as text; typed access goes through [`IniValue`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IniDocument {
    pub(crate) sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole document with the contents of `reader`.
    ///
    /// On error the document is left untouched.
    pub fn load<R: Read>(&mut self, mut reader: R) -> Result<(), IniError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        *self = crate::parse(&bytes)?;
        Ok(())
    }

    pub fn save<W: Write>(&self, mut writer: W) -> Result<(), IniError> {
        writer.write_all(&crate::render(self))?;
        writer.flush()?;
        Ok(())
    }

    pub fn get_section_by_name(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    fn get_section_by_name_mut(&mut self, name: &str) -> Option<&mut IniSection> {
        self.sections.iter_mut().find(|section| section.name == name)
    }

    pub fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        self.get_section_by_name(section)?.get_value_by_key(key)
    }

    pub fn read_string<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get_value(section, key).unwrap_or(default)
    }

    /// Creates the section and key as needed; an existing key keeps its position.
    pub fn write_string(&mut self, section: &str, key: &str, value: impl Into<String>) -> Result<(), IniError> {
        let value = value.into();
        check_section_name(section)?;
        check_entry(section, key, &value)?;

        match self.get_section_by_name_mut(section) {
            Some(existing) => existing.set_value(key.to_owned(), value),
            None => {
                let mut created = IniSection::new(section);
                created.set_value(key.to_owned(), value);
                self.sections.push(created);
            }
        }
        Ok(())
    }

    /// Returns `default` when the key is absent and [`IniError::Conversion`]
    /// when it is present but not a valid `T`.
    pub fn read<T: IniValue>(&self, section: &str, key: &str, default: T) -> Result<T, IniError> {
        let Some(value) = self.get_value(section, key) else {
            return Ok(default);
        };

        T::from_ini_str(value).ok_or_else(|| IniError::Conversion {
            section: section.to_owned(),
            key: key.to_owned(),
            value: value.to_owned(),
            type_name: T::TYPE_NAME,
        })
    }

    pub fn write<T: IniValue>(&mut self, section: &str, key: &str, value: T) -> Result<(), IniError> {
        self.write_string(section, key, value.to_ini_string())
    }

    pub fn get_sections(&self) -> Vec<&str> {
        self.sections.iter().map(|section| section.name.as_str()).collect()
    }

    pub fn get_section_count(&self) -> usize {
        self.sections.len()
    }

    /// `None` when the section does not exist.
    pub fn get_properties_count(&self, section: &str) -> Option<usize> {
        self.get_section_by_name(section).map(IniSection::len)
    }

    pub fn remove_section(&mut self, name: &str) -> Option<IniSection> {
        let index = self.sections.iter().position(|section| section.name == name)?;
        Some(self.sections.remove(index))
    }

    /// Removes a single property; the section stays even when it becomes empty.
    pub fn remove_property(&mut self, section: &str, key: &str) -> Option<String> {
        self.get_section_by_name_mut(section)?
            .remove_key(key)
            .map(|entry| entry.value)
    }

    /// Orders sections, and the properties of every section, by ordinal name comparison.
    pub fn sort(&mut self) {
        self.sections.sort_by(|a, b| a.name.cmp(&b.name));
        for section in self.sections.iter_mut() {
            section.sort_entries();
        }
    }

    /// Adds `section`, merging into an existing section of the same name.
    pub(crate) fn insert_section(&mut self, section: IniSection) {
        match self.get_section_by_name_mut(&section.name) {
            Some(existing) => existing.merge(section),
            None => self.sections.push(section),
        }
    }
}

impl Display for IniDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for section in self.sections.iter() {
            write!(f, "{section}")?;
        }
        Ok(())
    }
}
