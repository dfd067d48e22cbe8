//! Domain types: bars, validated series, indicator identities, verdicts.

pub mod bar;
pub mod kind;
pub mod series;
pub mod verdict;

pub use bar::Bar;
pub use kind::IndicatorKind;
pub use series::{SeriesError, TimeSeries};
pub use verdict::{ConsensusVerdict, IndicatorVerdict, Verdict};
