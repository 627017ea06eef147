use crate::TimeRange;
use std::num::ParseFloatError;
use time::OffsetDateTime;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to parse forecast document: {0}")]
    Document(#[from] serde_xml_rs::Error),
    #[error("Failed to parse time string: {0}")]
    TimeParse(#[from] time::error::Parse),
    #[error("Failed to parse value {value:?}: {source}")]
    InvalidValue {
        value: String,
        source: ParseFloatError,
    },
    #[error("Forecast document has no {0} element")]
    MissingElement(&'static str),
    #[error("Time layout {0} is not declared in the forecast document")]
    MissingLayout(String),
    #[error(
        "Time layout {key} has {} time ranges but the series has {} values: {intervals:?} vs {values:?}",
        .intervals.len(),
        .values.len()
    )]
    LengthMismatch {
        key: String,
        intervals: Vec<TimeRange>,
        values: Vec<String>,
    },
    #[error("Time layout {key} has {starts} start times but {ends} end times")]
    UnpairedEndTimes {
        key: String,
        starts: usize,
        ends: usize,
    },
    #[error("Time layout {key} has a range ending at {end} before it starts at {start}")]
    InvertedTimeRange {
        key: String,
        start: OffsetDateTime,
        end: OffsetDateTime,
    },
    #[error("No reading for right now")]
    NoCurrentReading,
}
