use std::{
    fs::{self, File},
    io::{BufWriter, ErrorKind},
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Builder as LoggerBuilder;
use inidoc::IniDocument;
use log::LevelFilter;

#[derive(Debug, Clone, ValueEnum)]
enum Verbosity {
    Warnings,
    Silent,
    Debug,
}

/// Simple cli tool to inspect and edit .ini files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path of the .ini file
    #[arg(short, long)]
    path: PathBuf,

    /// Log verbosity
    #[arg(short, long, value_enum, default_value_t = Verbosity::Warnings)]
    verbosity: Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value of a key
    Get {
        #[arg(short, long)]
        section: String,
        #[arg(short, long)]
        key: String,
        /// Printed when the key is missing instead of failing
        #[arg(short, long)]
        default: Option<String>,
    },
    /// Set the value of a key, creating the file, section or key as needed
    Set {
        #[arg(short, long)]
        section: String,
        #[arg(short, long)]
        key: String,
        #[arg(long)]
        value: String,
    },
    /// List section names in file order
    Sections,
    /// Count sections, or the keys of one section
    Count {
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Remove a section and all of its keys
    RemoveSection {
        #[arg(short, long)]
        section: String,
    },
    /// Remove a single key
    RemoveKey {
        #[arg(short, long)]
        section: String,
        #[arg(short, long)]
        key: String,
    },
    /// Sort sections and keys by name
    Sort,
}

fn load(path: &Path) -> anyhow::Result<IniDocument> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let mut document = IniDocument::new();
    document.load(file)?;
    Ok(document)
}

fn load_or_empty(path: &Path) -> anyhow::Result<IniDocument> {
    match fs::metadata(path) {
        Err(error) if error.kind() == ErrorKind::NotFound => {
            log::debug!("{} does not exist yet, starting from an empty document", path.display());
            Ok(IniDocument::new())
        }
        _ => load(path),
    }
}

fn save(path: &Path, document: &IniDocument) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    document.save(BufWriter::new(file))?;
    Ok(())
}

/// Executes `command` against the file at `path` and returns what should be printed.
fn run(path: &Path, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Get { section, key, default } => {
            let document = load(path)?;
            match (document.get_value(&section, &key), default) {
                (Some(value), _) => Ok(value.to_owned()),
                (None, Some(default)) => Ok(default),
                (None, None) if document.get_section_by_name(&section).is_none() => {
                    Err(anyhow!("The given ini file did not contain the specified section"))
                }
                (None, None) => Err(anyhow!("The given section did not contain the specified key")),
            }
        }
        Command::Set { section, key, value } => {
            let mut document = load_or_empty(path)?;
            document.write_string(&section, &key, value)?;
            save(path, &document)?;
            Ok(String::new())
        }
        Command::Sections => Ok(load(path)?.get_sections().join("\n")),
        Command::Count { section: None } => Ok(load(path)?.get_section_count().to_string()),
        Command::Count { section: Some(section) } => load(path)?
            .get_properties_count(&section)
            .map(|count| count.to_string())
            .ok_or_else(|| anyhow!("The given ini file did not contain the specified section")),
        Command::RemoveSection { section } => {
            let mut document = load(path)?;
            if document.remove_section(&section).is_none() {
                log::warn!("Section {section} not found, nothing removed");
            }
            save(path, &document)?;
            Ok(String::new())
        }
        Command::RemoveKey { section, key } => {
            let mut document = load(path)?;
            if document.remove_property(&section, &key).is_none() {
                log::warn!("Key {key} not found in section {section}, nothing removed");
            }
            save(path, &document)?;
            Ok(String::new())
        }
        Command::Sort => {
            let mut document = load(path)?;
            document.sort();
            save(path, &document)?;
            Ok(String::new())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.verbosity {
        Verbosity::Silent => (),
        Verbosity::Warnings => LoggerBuilder::new().filter(None, LevelFilter::Warn).init(),
        Verbosity::Debug => LoggerBuilder::new().filter(None, LevelFilter::Debug).init(),
    }

    if args.path.extension().is_none_or(|extension| extension != "ini") {
        log::warn!("Specified file does not have an .ini extension!");
    }

    let output = run(&args.path, args.command)?;

    if !output.is_empty() {
        print!("{output}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use crate::{Args, Command, run};

    const INI: &str = "[Section]\r\nkey=value\r\n\r\n[General]\r\nMagazineName=magazine.mgd\r\n\r\n";

    fn ini_file(contents: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.ini");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn command(args: &[&str]) -> Command {
        let mut argv = vec!["inidoc", "--path", "unused.ini"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn get_prints_value_or_default() {
        let (_dir, path) = ini_file(INI);

        assert_eq!(run(&path, command(&["get", "-s", "Section", "-k", "key"])).unwrap(), "value");
        assert_eq!(run(&path, command(&["get", "-s", "Section", "-k", "nope", "-d", "fallback"])).unwrap(), "fallback");
        assert!(run(&path, command(&["get", "-s", "Missing", "-k", "key"])).is_err());
    }

    #[test]
    fn set_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.ini");

        run(&path, command(&["set", "-s", "Section", "-k", "key", "--value", "value"])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[Section]\r\nkey=value\r\n\r\n");
    }

    #[test]
    fn sections_and_counts() {
        let (_dir, path) = ini_file(INI);

        assert_eq!(run(&path, command(&["sections"])).unwrap(), "Section\nGeneral");
        assert_eq!(run(&path, command(&["count"])).unwrap(), "2");
        assert_eq!(run(&path, command(&["count", "-s", "General"])).unwrap(), "1");
        assert!(run(&path, command(&["count", "-s", "Missing"])).is_err());
    }

    #[test]
    fn remove_and_sort_rewrite_file() {
        let (_dir, path) = ini_file(INI);

        run(&path, command(&["sort"])).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[General]\r\nMagazineName=magazine.mgd\r\n\r\n[Section]\r\nkey=value\r\n\r\n"
        );

        run(&path, command(&["remove-key", "-s", "General", "-k", "MagazineName"])).unwrap();
        run(&path, command(&["remove-section", "-s", "Section"])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[General]\r\n\r\n");
    }

    #[test]
    fn invalid_write_is_reported() {
        let (_dir, path) = ini_file(INI);

        assert!(run(&path, command(&["set", "-s", "Section", "-k", "a=b", "--value", "v"])).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), INI);
    }
}
