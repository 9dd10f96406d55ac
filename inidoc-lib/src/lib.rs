mod builders;
pub mod models;
mod value;

use regex::Regex;
use thiserror::Error;

pub use rust_decimal::Decimal;

pub use crate::builders::{IniDocumentBuilder, IniSectionBuilder};
pub use crate::models::{IniDocument, IniEntry, IniSection};
pub use crate::value::IniValue;

pub const ENTRY_KEY_GROUP_NAME: &str = "key";
pub const ENTRY_VALUE_GROUP_NAME: &str = "value";
pub const SECTION_NAME_GROUP_NAME: &str = "section_name";

/// Terminator written after every line, including the blank line closing a section.
pub const LINE_ENDING: &str = "\r\n";

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Error, Debug)]
pub enum IniError {
    #[error("Regex compilation error: {0}")]
    RegexCompilationError(#[from] regex::Error),
    #[error("The group {0} was not found in the provided regex")]
    RegexCaptureGroupNotFound(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("Value {value:?} of [{section}] {key} is not a valid {type_name}")]
    Conversion {
        section: String,
        key: String,
        value: String,
        type_name: &'static str,
    },
    #[error("Invalid section name {0:?}: must be non-empty and on a single line")]
    InvalidSectionName(String),
    #[error("Invalid key {key:?} in [{section}]: must be non-empty, single-line and free of '='")]
    InvalidKey { section: String, key: String },
    #[error("Invalid value for [{section}] {key}: it would not read back as written")]
    InvalidValue { section: String, key: String },
}

/// Parses INI text into a document.
///
/// Lines end in CRLF, although a bare CR or LF is accepted as well. Blank
/// lines are ignored, as are properties appearing before the first section
/// header and lines that are neither a header nor `key=value`. A broken
/// header such as `[]` closes the current section, so the properties under
/// it are skipped rather than attributed to the section before. A section
/// header that repeats an earlier one continues that section.
pub fn parse(ini_bytes: &[u8]) -> Result<IniDocument, IniError> {
    let ini_string = std::str::from_utf8(ini_bytes)?;
    let ini_string = ini_string.strip_prefix(BYTE_ORDER_MARK).unwrap_or(ini_string);

    let section_header_regex = Regex::new(&format!(r"^\[(?P<{SECTION_NAME_GROUP_NAME}>.+)\]$"))?;
    let key_value_regex = Regex::new(&format!(
        r"^(?P<{ENTRY_KEY_GROUP_NAME}>[^=]+)=(?P<{ENTRY_VALUE_GROUP_NAME}>.*)$"
    ))?;

    let mut document_builder = IniDocumentBuilder::new();
    let mut current_section_builder: Option<IniSectionBuilder> = None;

    for line in ini_string.split(['\r', '\n']) {
        if line.trim().is_empty() {
            continue;
        }

        log::debug!("Parsing line: {line}");

        if let Some(section_header_captures) = section_header_regex.captures(line) {
            log::debug!("Line matched section header regex");

            document_builder = add_section(document_builder, current_section_builder.take())?;

            let section_name = section_header_captures
                .name(SECTION_NAME_GROUP_NAME)
                .ok_or(IniError::RegexCaptureGroupNotFound(SECTION_NAME_GROUP_NAME))?;
            current_section_builder = Some(IniSectionBuilder::new(section_name.as_str()));

            continue;
        }

        if let Some(key_value_captures) = key_value_regex.captures(line) {
            log::debug!("Line matched key-value regex.");

            let Some(section_builder) = current_section_builder.take() else {
                log::warn!("Skipping property outside of any section: {line}");
                continue;
            };
            current_section_builder = Some(section_builder.add_entry(IniEntry::try_from(key_value_captures)?));

            continue;
        }

        if line.starts_with('[') {
            log::warn!("Skipping malformed section header, properties up to the next header are ignored: {line}");
            document_builder = add_section(document_builder, current_section_builder.take())?;
            continue;
        }

        log::warn!("Skipping unparsable non-empty line: {line}");
    }

    log::debug!("End of input reached. Adding current section, if we are building one.");

    Ok(add_section(document_builder, current_section_builder)?.build())
}

fn add_section(
    document_builder: IniDocumentBuilder,
    section_builder: Option<IniSectionBuilder>,
) -> Result<IniDocumentBuilder, IniError> {
    let Some(section_builder) = section_builder else {
        return Ok(document_builder);
    };

    let section = section_builder.build()?;
    log::debug!("Adding section {section:?}");
    Ok(document_builder.new_section(section))
}

/// Renders a document to its CRLF text form. Every section, the last one
/// included, is followed by a blank line.
pub fn render(document: &IniDocument) -> Vec<u8> {
    document.to_string().into_bytes()
}
