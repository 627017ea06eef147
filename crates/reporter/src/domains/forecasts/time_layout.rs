use crate::{Dwml, Error, Time, TimeLayout};
use std::collections::HashMap;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start_time: OffsetDateTime,
    /// `None` when the layout declares no end times; open until the next range or forever
    pub end_time: Option<OffsetDateTime>,
}

impl TimeRange {
    pub fn new(start_time: OffsetDateTime, end_time: Option<OffsetDateTime>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start_time <= instant && self.end_time.map_or(true, |end| end > instant)
    }
}

/// Time ranges of every keyed `time-layout` in a document, in declaration order.
///
/// Built once per document and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeLayouts {
    layouts: HashMap<String, Vec<TimeRange>>,
}

impl TimeLayouts {
    pub fn get(&self, key: &str) -> Option<&[TimeRange]> {
        self.layouts.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Vec<TimeRange>)> for TimeLayouts {
    fn from_iter<I: IntoIterator<Item = (String, Vec<TimeRange>)>>(iter: I) -> Self {
        Self {
            layouts: iter.into_iter().collect(),
        }
    }
}

pub fn build_time_layouts(raw_data: &Dwml) -> Result<TimeLayouts, Error> {
    let mut layouts: HashMap<String, Vec<TimeRange>> = HashMap::new();
    for time_layout in &raw_data.data.time_layout {
        // Layouts without a key can't be referenced by any series
        let Some(key) = time_layout.layout_key() else {
            continue;
        };
        layouts.insert(key.to_owned(), time_layout.to_time_ranges()?);
    }
    Ok(TimeLayouts { layouts })
}

impl TimeLayout {
    pub fn layout_key(&self) -> Option<&str> {
        self.time.iter().find_map(|item| match item {
            Time::LayoutKey(key) => Some(key.trim()),
            _ => None,
        })
    }

    pub fn to_time_ranges(&self) -> Result<Vec<TimeRange>, Error> {
        let key = self.layout_key().unwrap_or_default();
        let mut start_times = Vec::new();
        let mut end_times = Vec::new();
        for item in &self.time {
            match item {
                Time::LayoutKey(_) => (),
                Time::StartTime(start_time) => start_times.push(parse_time(start_time)?),
                Time::EndTime(end_time) => end_times.push(parse_time(end_time)?),
            }
        }

        if end_times.is_empty() {
            return Ok(start_times
                .into_iter()
                .map(|start_time| TimeRange::new(start_time, None))
                .collect());
        }

        if end_times.len() != start_times.len() {
            return Err(Error::UnpairedEndTimes {
                key: key.to_owned(),
                starts: start_times.len(),
                ends: end_times.len(),
            });
        }

        start_times
            .into_iter()
            .zip(end_times)
            .map(|(start, end)| {
                if start > end {
                    return Err(Error::InvertedTimeRange {
                        key: key.to_owned(),
                        start,
                        end,
                    });
                }
                Ok(TimeRange::new(start, Some(end)))
            })
            .collect()
    }
}

fn parse_time(raw: &str) -> Result<OffsetDateTime, Error> {
    let parsed = OffsetDateTime::parse(raw.trim(), &Rfc3339)?;
    Ok(parsed)
}
