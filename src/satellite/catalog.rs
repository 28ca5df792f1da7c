use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sgp4::Elements;

use crate::satellite::error::CatalogError;
use crate::satellite::types::SatelliteEntry;

/// TLE files and directories of TLE files merged into one satellite list.
/// Later sources replace earlier entries with the same catalog number.
pub struct TleCatalog {
    sources: Vec<PathBuf>,
    entries: Vec<SatelliteEntry>,
    index: HashMap<u64, usize>,
}

impl TleCatalog {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self {
            sources,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Load every source. Unreadable or malformed files are skipped with a
    /// warning; a missing source is an error.
    pub fn load_all(&mut self) -> Result<(), CatalogError> {
        self.entries.clear();
        self.index.clear();

        let sources = self.sources.clone();
        for source in &sources {
            if !source.exists() {
                return Err(CatalogError::NotFound(source.display().to_string()));
            }

            if source.is_dir() {
                let mut files = Vec::new();
                for entry in fs::read_dir(source)? {
                    let path = entry?.path();
                    if path.is_file() && has_tle_extension(&path) {
                        files.push(path);
                    }
                }
                files.sort();
                for path in files {
                    self.load_file_lenient(&path);
                }
            } else {
                self.load_file_lenient(source);
            }
        }

        log::info!(
            "Loaded {} satellites from {} TLE sources",
            self.entries.len(),
            self.sources.len()
        );
        Ok(())
    }

    fn load_file_lenient(&mut self, path: &Path) {
        match parse_tle_file(path) {
            Ok(entries) => {
                for entry in entries {
                    self.insert(entry);
                }
            }
            Err(e) => {
                log::warn!("Failed to parse TLE file {}: {}", path.display(), e);
            }
        }
    }

    fn insert(&mut self, entry: SatelliteEntry) {
        let Some(norad_id) = entry.catalog_number() else {
            self.entries.push(entry);
            return;
        };
        match self.index.get(&norad_id) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(norad_id, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn satellites(&self) -> &[SatelliteEntry] {
        &self.entries
    }

    pub fn into_satellites(self) -> Vec<SatelliteEntry> {
        self.entries
    }
}

fn has_tle_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "tle" || ext == "txt")
        .unwrap_or(false)
}

/// Parse a single TLE file (may contain multiple satellites). Every record
/// must parse with SGP4 or the whole file is rejected.
pub fn parse_tle_file(path: &Path) -> Result<Vec<SatelliteEntry>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    parse_tle_text(&content, &filename)
}

pub fn parse_tle_text(content: &str, source: &str) -> Result<Vec<SatelliteEntry>, CatalogError> {
    parse_multi_tle(content)
        .into_iter()
        .map(|(name, line1, line2)| {
            Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes()).map_err(|e| {
                CatalogError::InvalidTle {
                    file: source.to_string(),
                    message: e.to_string(),
                }
            })?;
            Ok(SatelliteEntry::from_tle(name, &line1, &line2))
        })
        .collect()
}

/// Split multi-satellite TLE content into (name, line1, line2) records,
/// accepting both 2-line and 3-line layouts.
fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            let name = lines[i].trim_start_matches("0 ").trim().to_string();
            result.push((Some(name), lines[i + 1].to_string(), lines[i + 2].to_string()));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::satellite::propagator::tests::{ISS_LINE1, ISS_LINE2};

    #[test]
    fn parses_two_and_three_line_records() {
        let text = format!(
            "ISS (ZARYA)\n{}\n{}\n\n{}\n{}\n",
            ISS_LINE1, ISS_LINE2, ISS_LINE1, ISS_LINE2
        );
        let records = parse_multi_tle(&text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0.as_deref(), Some("ISS (ZARYA)"));
        assert_eq!(records[1].0, None);
    }

    #[test]
    fn trailing_lines_are_skipped() {
        let text = format!("0 ISS\n{}\n{}\ntrailing\n", ISS_LINE1, ISS_LINE2);
        let entries = parse_tle_text(&text, "test.tle").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.as_deref(), Some("ISS"));
    }

    #[test]
    fn malformed_record_rejects_file() {
        let broken = ISS_LINE2.replace("51.6461", "5x.6461");
        let text = format!("{}\n{}\n", ISS_LINE1, broken);
        let err = parse_tle_text(&text, "bad.tle").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTle { ref file, .. } if file == "bad.tle"));
    }

    #[test]
    fn later_entries_replace_same_catalog_number() {
        let mut catalog = TleCatalog::new(Vec::new());
        catalog.insert(SatelliteEntry::from_tle(Some("old".into()), ISS_LINE1, ISS_LINE2));
        catalog.insert(SatelliteEntry::from_tle(Some("new".into()), ISS_LINE1, ISS_LINE2));
        assert_eq!(catalog.satellites().len(), 1);
        assert_eq!(catalog.satellites()[0].name.as_deref(), Some("new"));
    }

    #[test]
    fn missing_source_is_an_error() {
        let mut catalog = TleCatalog::new(vec![PathBuf::from("/nonexistent/catalog.tle")]);
        assert!(matches!(catalog.load_all(), Err(CatalogError::NotFound(_))));
    }
}
