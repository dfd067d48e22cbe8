//! Bar loading for the runner.
//!
//! Reads `datetime,open,high,low,close,volume` CSV files and normalizes them
//! through the core ingest step. In a directory scan, a symbol that fails to
//! load is logged and left out; the rest of the universe still runs.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use verdict_core::data::{ingest, IngestError, RawBar};
use verdict_core::domain::TimeSeries;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}: {source}")]
    Ingest {
        path: PathBuf,
        #[source]
        source: IngestError,
    },

    #[error("no CSV files in {0}")]
    NoData(PathBuf),
}

/// Result of a directory scan.
#[derive(Debug)]
pub struct LoadedUniverse {
    /// Successfully loaded series, sorted by symbol.
    pub series: Vec<TimeSeries>,
    /// Symbols that were skipped, with the reason.
    pub failures: Vec<(String, String)>,
}

/// Load one CSV file as `symbol`.
pub fn load_csv(path: &Path, symbol: &str) -> Result<TimeSeries, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let rows = reader
        .deserialize::<RawBar>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let series = ingest(symbol, rows).map_err(|source| LoadError::Ingest {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(symbol, bars = series.len(), path = %path.display(), "loaded csv");
    Ok(series)
}

/// Load every `*.csv` in `dir`, one symbol per file named by the file stem.
///
/// `symbols`, when given, restricts the scan to those stems and keeps their
/// order; a requested symbol with no file is a failure, not an error.
pub fn load_dir(dir: &Path, symbols: Option<&[String]>) -> Result<LoadedUniverse, LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<(String, PathBuf)> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv")))
        .filter_map(|p| {
            let stem = p.file_stem()?.to_str()?.to_string();
            Some((stem, p))
        })
        .collect();
    files.sort();

    let wanted: Vec<(String, Option<PathBuf>)> = match symbols {
        Some(list) => list
            .iter()
            .map(|s| {
                let path = files.iter().find(|(stem, _)| stem == s).map(|(_, p)| p.clone());
                (s.clone(), path)
            })
            .collect(),
        None => {
            if files.is_empty() {
                return Err(LoadError::NoData(dir.to_path_buf()));
            }
            files.into_iter().map(|(s, p)| (s, Some(p))).collect()
        }
    };

    let mut series = Vec::with_capacity(wanted.len());
    let mut failures = Vec::new();
    for (symbol, path) in wanted {
        let Some(path) = path else {
            warn!(symbol = %symbol, "no data file, skipping symbol");
            failures.push((symbol, "no data file".to_string()));
            continue;
        };
        match load_csv(&path, &symbol) {
            Ok(s) => series.push(s),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "failed to load symbol, skipping");
                failures.push((symbol, e.to_string()));
            }
        }
    }

    Ok(LoadedUniverse { series, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    const GOOD: &str = "datetime,open,high,low,close,volume\n\
        2024-01-03,101,102,100,101.5,1200\n\
        2024-01-02,100,101,99,100.5,1000\n";

    #[test]
    fn loads_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "SPY.csv", GOOD);
        let series = load_csv(&path, "SPY").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[0].close, 100.5);
        assert_eq!(series.bars()[1].volume, 1200);
    }

    #[test]
    fn accepts_date_header_and_missing_volume() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "X.csv",
            "date,open,high,low,close\n2024-01-02,1,2,0.5,1.5\n",
        );
        let series = load_csv(&path, "X").unwrap();
        assert_eq!(series.bars()[0].volume, 0);
    }

    #[test]
    fn bad_rows_are_ingest_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "BAD.csv",
            "datetime,open,high,low,close,volume\nnot-a-date,1,2,0,1,10\n",
        );
        let err = load_csv(&path, "BAD").unwrap_err();
        assert!(matches!(err, LoadError::Ingest { .. }));
    }

    #[test]
    fn directory_scan_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "SPY.csv", GOOD);
        write_csv(dir.path(), "QQQ.csv", GOOD);
        write_csv(
            dir.path(),
            "BAD.csv",
            "datetime,open,high,low,close,volume\n2024-01-02,x,1,1,1,1\n",
        );
        write_csv(dir.path(), "notes.txt", "ignored");

        let loaded = load_dir(dir.path(), None).unwrap();
        let symbols: Vec<&str> = loaded.series.iter().map(|s| s.symbol()).collect();
        assert_eq!(symbols, vec!["QQQ", "SPY"]);
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].0, "BAD");
    }

    #[test]
    fn requested_symbols_keep_order_and_report_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(dir.path(), "SPY.csv", GOOD);
        write_csv(dir.path(), "QQQ.csv", GOOD);

        let wanted = vec!["SPY".to_string(), "DIA".to_string(), "QQQ".to_string()];
        let loaded = load_dir(dir.path(), Some(&wanted)).unwrap();
        let symbols: Vec<&str> = loaded.series.iter().map(|s| s.symbol()).collect();
        assert_eq!(symbols, vec!["SPY", "QQQ"]);
        assert_eq!(loaded.failures, vec![("DIA".to_string(), "no data file".to_string())]);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_dir(dir.path(), None), Err(LoadError::NoData(_))));
    }
}
