//! Load net-worth samples from CSV (`amount,timestamp`)
//!
//! Timestamps may be RFC 3339 (`2024-05-01T12:00:00Z`) or a plain date
//! (`2024-05-01`, read as midnight UTC).

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use csv::Reader;

use super::{NetWorthHistory, NetWorthSample};
use crate::error::LoadError;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    amount: f64,
    timestamp: String,
}

impl CsvRow {
    fn to_sample(self, row: usize) -> Result<NetWorthSample, LoadError> {
        if !self.amount.is_finite() {
            return Err(LoadError::NonFiniteAmount { row });
        }
        let timestamp = parse_timestamp(&self.timestamp)
            .ok_or(LoadError::InvalidTimestamp { row, value: self.timestamp })?;
        Ok(NetWorthSample::new(self.amount, timestamp))
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Load history from a CSV file
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<NetWorthHistory, LoadError> {
    let reader = Reader::from_path(path.as_ref())?;
    let history = read_rows(reader)?;
    log::info!("loaded {} net-worth sample(s) from {}", history.len(), path.as_ref().display());
    Ok(history)
}

/// Load history from any reader (e.g., string buffer)
pub fn load_history_from_reader<R: Read>(reader: R) -> Result<NetWorthHistory, LoadError> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: Read>(mut reader: Reader<R>) -> Result<NetWorthHistory, LoadError> {
    let mut samples = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        samples.push(row.to_sample(index + 1)?);
    }
    Ok(NetWorthHistory::new(samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_timestamp_formats() {
        let data = "\
amount,timestamp
250000,2024-01-15
262500.50,2024-06-30T18:45:00Z
255000,2024-03-01T00:00:00-05:00
";
        let history = load_history_from_reader(data.as_bytes()).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest().unwrap().amount, 262_500.50);
    }

    #[test]
    fn test_bad_timestamp_reports_row() {
        let data = "amount,timestamp\n1000,2024-01-01\n2000,last tuesday\n";
        let err = load_history_from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidTimestamp { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "last tuesday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        let data = "amount,timestamp\nNaN,2024-01-01\n";
        let err = load_history_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NonFiniteAmount { row: 1 }));
    }
}
