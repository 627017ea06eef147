use crate::{Error, TimeLayouts, TimeRange};
use std::fmt::Debug;
use time::OffsetDateTime;

/// Values of one series zipped with the time ranges of its layout
pub type TimeMap<V> = Vec<(TimeRange, V)>;

/// A data series element that references a `time-layout` by key and holds one child per time range
pub trait TimeSeries {
    type Item: Clone + Debug;

    fn time_layout(&self) -> &str;

    fn items(&self) -> &[Self::Item];
}

pub fn time_map_for<S: TimeSeries>(
    time_layouts: &TimeLayouts,
    series: &S,
) -> Result<TimeMap<S::Item>, Error> {
    let key = series.time_layout();
    let time_ranges = time_layouts
        .get(key)
        .ok_or_else(|| Error::MissingLayout(key.to_owned()))?;
    let items = series.items();

    if time_ranges.len() != items.len() {
        return Err(Error::LengthMismatch {
            key: key.to_owned(),
            intervals: time_ranges.to_vec(),
            values: items.iter().map(|item| format!("{:?}", item)).collect(),
        });
    }

    Ok(time_ranges
        .iter()
        .cloned()
        .zip(items.iter().cloned())
        .collect())
}

/// Value of the last time range containing `instant`.
///
/// Falls back to the first entry when nothing contains `instant`, so an instant before
/// every range reports the earliest value. Only an empty map has no entry.
pub fn entry_for_time<V>(time_map: &[(TimeRange, V)], instant: OffsetDateTime) -> Option<&V> {
    let (_, first) = time_map.first()?;
    let mut current = first;
    for (time_range, value) in time_map {
        if time_range.contains(instant) {
            current = value;
        }
    }
    Some(current)
}

pub fn map_values<V, U, F>(time_map: TimeMap<V>, mut convert: F) -> Result<TimeMap<U>, Error>
where
    F: FnMut(V) -> Result<U, Error>,
{
    time_map
        .into_iter()
        .map(|(time_range, value)| Ok((time_range, convert(value)?)))
        .collect()
}
