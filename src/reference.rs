//! Reference table of the region's towns.
//!
//! Loaded once at startup from a CSV file and shared read-only afterwards. Lookups go
//! through [`comparison_key`], so they ignore case and whitespace layout.

use crate::constants::*;
use crate::errors::{AppError, AppResult};
use crate::models::TownRecord;
use crate::normalize::comparison_key;
use csv::StringRecord;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Postal and INSEE codes before padding: up to five digits, Corsican INSEE codes
/// carry a letter.
static CODE_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Default)]
pub struct ReferenceTable {
    records: Vec<TownRecord>,
    index: HashMap<String, usize>,
}

/// Column positions resolved from the header row.
struct Columns {
    name: usize,
    latitude: usize,
    longitude: usize,
    postal_code: usize,
    insee_code: usize,
    department: usize,
    region: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> AppResult<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };
        let required = |name: &str| {
            position(name)
                .ok_or_else(|| AppError::DataLoadError(format!("missing required column {name}")))
        };

        let department = position(COL_DEPARTMENT)
            .or_else(|| position(COL_DEPARTMENT_ACCENTED))
            .ok_or_else(|| {
                AppError::DataLoadError(format!("missing required column {COL_DEPARTMENT}"))
            })?;

        Ok(Self {
            name: required(COL_TOWN_NAME)?,
            latitude: required(COL_LATITUDE)?,
            longitude: required(COL_LONGITUDE)?,
            postal_code: required(COL_POSTAL_CODE)?,
            insee_code: required(COL_INSEE_CODE)?,
            department,
            region: position(COL_REGION),
        })
    }
}

impl ReferenceTable {
    /// Loads the reference table from a CSV file.
    ///
    /// When `region` is set and the file has a `nom_region` column, only rows of that
    /// region are kept.
    ///
    /// # Errors
    ///
    /// Returns `DataLoadError` if the file cannot be opened, a required column is
    /// missing, or a row carries an invalid code or coordinate.
    pub fn load(path: &Path, region: Option<&str>) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| {
            AppError::DataLoadError(format!("cannot open {}: {e}", path.display()))
        })?;
        let table = Self::from_reader(file, region)?;
        info!(
            path = %path.display(),
            towns = table.len(),
            "Reference table loaded"
        );
        Ok(table)
    }

    /// Reads the table from any CSV source. Duplicate names keep the first row.
    pub fn from_reader<R: Read>(reader: R, region: Option<&str>) -> AppResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);
        let columns = Columns::from_headers(rdr.headers()?)?;

        let mut table = ReferenceTable::default();
        let mut skipped = 0usize;

        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            // Header is line 1
            let line = row + 2;

            if let (Some(wanted), Some(idx)) = (region, columns.region) {
                if field(&record, idx) != wanted {
                    continue;
                }
            }

            let canonical_name = field(&record, columns.name).to_string();
            let (latitude, longitude) = match (
                parse_coordinate(&record, columns.latitude, line)?,
                parse_coordinate(&record, columns.longitude, line)?,
            ) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => {
                    debug!(line, town = %canonical_name, "Row without coordinates");
                    skipped += 1;
                    continue;
                }
            };

            table.insert(TownRecord {
                postal_code: pad_code(field(&record, columns.postal_code), COL_POSTAL_CODE, line)?,
                insee_code: pad_code(field(&record, columns.insee_code), COL_INSEE_CODE, line)?,
                department_name: field(&record, columns.department).to_string(),
                canonical_name,
                latitude,
                longitude,
            });
        }

        if skipped > 0 {
            warn!(skipped, "Skipped reference rows without coordinates");
        }

        Ok(table)
    }

    fn insert(&mut self, record: TownRecord) {
        let key = comparison_key(&record.canonical_name);
        if key.is_empty() {
            return;
        }
        let next = self.records.len();
        // First-loaded record wins on duplicate names
        if let std::collections::hash_map::Entry::Vacant(slot) = self.index.entry(key) {
            slot.insert(next);
            self.records.push(record);
        }
    }

    /// Finds a town by name, ignoring case and whitespace layout.
    pub fn lookup(&self, name: &str) -> Option<&TownRecord> {
        self.index
            .get(&comparison_key(name))
            .map(|&idx| &self.records[idx])
    }

    /// Towns in load order.
    pub fn towns(&self) -> impl Iterator<Item = &TownRecord> {
        self.records.iter()
    }

    /// Towns of a department, matched ignoring case (accented letters included).
    pub fn in_department<'a>(
        &'a self,
        department: &str,
    ) -> impl Iterator<Item = &'a TownRecord> + 'a {
        let wanted = department.trim().to_lowercase();
        self.records
            .iter()
            .filter(move |t| t.department_name.to_lowercase() == wanted)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

fn parse_coordinate(record: &StringRecord, idx: usize, line: usize) -> AppResult<Option<f64>> {
    let raw = field(record, idx);
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some).map_err(|e| {
        AppError::DataLoadError(format!("line {line}: invalid coordinate {raw:?}: {e}"))
    })
}

/// Left-pads a postal or INSEE code with zeros to [`CODE_WIDTH`] characters.
pub fn pad_code(raw: &str, column: &str, line: usize) -> AppResult<String> {
    let code_regex = CODE_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9][0-9AB]?[0-9]{0,3}$").expect("CODE_REGEX is a valid regex pattern")
    });

    let raw = raw.trim();
    if raw.len() > CODE_WIDTH || !code_regex.is_match(raw) {
        return Err(AppError::DataLoadError(format!(
            "line {line}: invalid {column} {raw:?}"
        )));
    }
    Ok(format!("{raw:0>CODE_WIDTH$}"))
}
