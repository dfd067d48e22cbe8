//! Verdict Core: OHLCV series, technical indicators, per-indicator
//! verdicts and consensus voting.
//!
//! This crate contains the analysis engine:
//! - Domain types (bars, validated series, verdicts, indicator kinds)
//! - Indicator computation over whole series, NaN for undefined bars
//! - One classifier per indicator turning values into a five-level verdict
//! - Weighted consensus voting with a normalized strength score
//! - Strategy profiles loaded from TOML
//! - Raw-row ingest and the per-symbol `analyze` pipeline

pub mod classify;
pub mod consensus;
pub mod data;
pub mod domain;
pub mod engine;
pub mod factory;
pub mod fingerprint;
pub mod indicators;
pub mod profile;
