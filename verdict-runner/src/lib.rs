//! Verdict Runner: per-symbol fan-out, data loading, export.
//!
//! This crate builds on `verdict-core` to provide:
//! - Universe analysis, one independent pipeline per symbol (rayon)
//! - CSV loading through the core ingest step
//! - Deterministic synthetic series for demos and benchmarks
//! - Per-bar CSV/JSON export and a latest-verdict summary

pub mod data_loader;
pub mod export;
pub mod runner;
pub mod synthetic;

pub use data_loader::{load_csv, load_dir, LoadError, LoadedUniverse};
pub use export::{latest_summary, report_csv, report_json, save_reports, LatestVerdict};
pub use runner::{analyze_universe, UniverseReport};
pub use synthetic::{synthetic_series, synthetic_universe};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn universe_report_is_send_sync() {
        assert_send::<UniverseReport>();
        assert_sync::<UniverseReport>();
    }

    #[test]
    fn latest_verdict_is_send_sync() {
        assert_send::<LatestVerdict>();
        assert_sync::<LatestVerdict>();
    }

    #[test]
    fn load_error_is_send_sync() {
        assert_send::<LoadError>();
        assert_sync::<LoadError>();
    }
}
