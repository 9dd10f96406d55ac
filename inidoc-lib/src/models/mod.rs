mod document;
mod entry;
mod section;

pub use document::IniDocument;
pub use entry::IniEntry;
pub use section::IniSection;

pub(crate) use entry::{check_entry, check_section_name};
