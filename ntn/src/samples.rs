//! Weekly sample records from the local delimited file.
//!
//! The file has a header row with at least `siteID`, `labno` and `yrmonth`
//! columns; every other column is passed through untouched. Each scan reads
//! the whole file: nothing is indexed or cached between requests.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::config::NtnConfig;
use crate::error::{NtnError, Result};
use crate::model::{to_record, SampleMap};
use crate::validate::SamplesQuery;

/// Header of the column holding the site id.
pub const SITE_ID_COLUMN: &str = "siteID";
/// Header of the column holding the lab number.
pub const LAB_NO_COLUMN: &str = "labno";
/// Header of the column holding the `YYYYMM` sample month.
pub const YRMONTH_COLUMN: &str = "yrmonth";

fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| NtnError::MissingColumn {
            column: column.to_string(),
        })
}

/// Scan delimited sample rows for one site and month range.
///
/// Keeps rows whose site id matches exactly and whose `yrmonth` lies in
/// `query.start..=query.end`. `YYYYMM` strings are fixed width, so the range
/// check compares them as strings. Kept rows are grouped as
/// `site_id -> labno -> other columns`.
///
/// Short rows are tolerated: missing trailing columns read as empty, and a
/// row too short to carry a site id or month never matches. A matching row
/// without a lab number, or a row that cannot be decoded at all, fails the
/// whole scan.
pub fn scan_samples<R: Read>(reader: R, query: &SamplesQuery) -> Result<SampleMap> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let site_idx = column_index(&headers, SITE_ID_COLUMN)?;
    let yrmonth_idx = column_index(&headers, YRMONTH_COLUMN)?;
    let lab_no_idx = column_index(&headers, LAB_NO_COLUMN)?;

    let range = query.start.as_str()..=query.end.as_str();
    let mut samples = SampleMap::new();

    for row in reader.records() {
        let row = row?;

        if row.get(site_idx) != Some(query.site_id.as_str()) {
            continue;
        }
        if !row.get(yrmonth_idx).is_some_and(|m| range.contains(&m)) {
            continue;
        }

        if row.get(lab_no_idx).is_none() {
            return Err(NtnError::MissingField {
                line: row.position().map_or(0, |p| p.line()),
                column: LAB_NO_COLUMN.to_string(),
            });
        }

        let mut record = to_record(&headers, &row);
        let site_id = record.remove(SITE_ID_COLUMN).unwrap_or_default();
        let lab_no = record.remove(LAB_NO_COLUMN).unwrap_or_default();

        samples.entry(site_id).or_default().insert(lab_no, record);
    }

    Ok(samples)
}

/// Handle on the local sample file.
#[derive(Debug, Clone)]
pub struct SampleStore {
    path: PathBuf,
}

impl SampleStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn from_config(config: &NtnConfig) -> Self {
        Self::new(config.samples_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file and scan it with [`scan_samples`].
    pub fn scan(&self, query: &SamplesQuery) -> Result<SampleMap> {
        let file = File::open(&self.path)?;
        scan_samples(BufReader::new(file), query)
    }

    /// Scan, logging any failure and returning an empty mapping in its
    /// place. Rows matched before a failure are discarded.
    pub fn load(&self, query: &SamplesQuery) -> SampleMap {
        match self.scan(query) {
            Ok(samples) => {
                tracing::debug!(
                    site_id = %query.site_id,
                    start = %query.start,
                    end = %query.end,
                    records = samples.values().map(|labs| labs.len()).sum::<usize>(),
                    "Sample scan complete"
                );
                samples
            }
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Sample scan failed"
                );
                SampleMap::new()
            }
        }
    }
}
