//=====================================================================
// xsdir: resolves an ACE table name ("92235.800nc") to the absolute
// path of the binary file that contains it. Grounded in the original
// engine's `AceReader::getTable` (`Material/AceTable/AceReader/ACEReader.cpp`):
// scan the index after its "directory" line, match the table name, and
// join the listed file name onto the data directory.
//
// Directory resolution itself mirrors `Ace::Conf::DATAPATH`: an
// `xs_data` environment override, falling back to a compile-time
// default if unset.
//=====================================================================
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, TransportError};
use crate::logging::Logger;

const DEFAULT_DATAPATH: &str = "/usr/share/xsdata";

// Resolve the ACE data directory: `xs_data` env var first, else the
// compile-time default.
pub fn data_path() -> PathBuf {
    match std::env::var("xs_data") {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from(DEFAULT_DATAPATH),
    }
}

#[derive(Debug, Clone)]
struct Entry {
    file_name: String,
}

// A parsed xsdir index: table name -> entry. Built once at setup and
// shared read-only across every isotope load.
pub struct Xsdir {
    directory: PathBuf,
    entries: HashMap<String, Entry>,
}

impl Xsdir {
    // Load and parse `{directory}/xsdir`, logging the directory in use
    // the way the original does at startup.
    pub fn load(directory: impl Into<PathBuf>, logger: &Logger) -> Result<Self> {
        let directory = directory.into();
        logger.msg(&format!(" - Using xsdir from directory {}", directory.display()));
        let path = directory.join("xsdir");
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| TransportError::lookup(path.display().to_string(), e.to_string()))?;
        let entries = parse_xsdir(&contents);
        Ok(Self { directory, entries })
    }

    pub fn load_default(logger: &Logger) -> Result<Self> {
        Self::load(data_path(), logger)
    }

    // Resolve a table name to the absolute path of the file that holds
    // it. Only the file name is needed downstream: `PaceData::from_PACE`
    // reads one table per file and has no use for the address/length
    // fields the xsdir line also carries.
    pub fn resolve(&self, table_name: &str) -> Result<PathBuf> {
        let entry = self
            .entries
            .get(table_name)
            .ok_or_else(|| TransportError::lookup(table_name.to_string(), self.directory.display().to_string()))?;
        Ok(self.directory.join(&entry.file_name))
    }
}

// Lines after the "directory" marker look like:
//   92235.800nc  234.69999 92235.800nc.ace  0  1  12345  67890
// (table_name, awr_ratio, file_name, access_route, file_type, address, table_length)
// - we only need the first and third fields.
fn parse_xsdir(contents: &str) -> HashMap<String, Entry> {
    let mut entries = HashMap::new();
    let mut lines = contents.lines();
    for line in lines.by_ref() {
        if line.trim().eq_ignore_ascii_case("directory") {
            break;
        }
    }
    for line in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }
        entries.insert(fields[0].to_string(), Entry { file_name: fields[2].to_string() });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
datapath = /opt/xsdata
atomic weight ratios
  1001.800nc  0.999167
directory
92235.800nc  233.024800  92235.800nc.ace  0  1  1  123456
8016.800nc   15.857510   8016.800nc.ace   0  1  1  654321
";

    #[test]
    fn test_parse_xsdir_skips_preamble_before_directory_marker() {
        let entries = parse_xsdir(SAMPLE);
        assert_eq!(entries.len(), 2);
        assert!(entries.contains_key("92235.800nc"));
    }

    #[test]
    fn test_resolve_joins_directory_and_file_name() {
        let xsdir = Xsdir { directory: PathBuf::from("/data"), entries: parse_xsdir(SAMPLE) };
        let path = xsdir.resolve("8016.800nc").unwrap();
        assert_eq!(path, Path::new("/data/8016.800nc.ace"));
    }

    #[test]
    fn test_resolve_missing_table_is_an_error() {
        let xsdir = Xsdir { directory: PathBuf::from("/data"), entries: parse_xsdir(SAMPLE) };
        assert!(xsdir.resolve("99999.800nc").is_err());
    }

    #[test]
    fn test_data_path_respects_environment_override() {
        std::env::set_var("xs_data", "/custom/path");
        assert_eq!(data_path(), PathBuf::from("/custom/path"));
        std::env::remove_var("xs_data");
        assert_eq!(data_path(), PathBuf::from(DEFAULT_DATAPATH));
    }
}
