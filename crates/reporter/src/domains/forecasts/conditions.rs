use crate::{time_map_for, ConditionValue, Dwml, Error, TimeLayouts, TimeMap, WeatherConditions};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    #[serde(rename = "weather-type", skip_serializing_if = "Option::is_none")]
    pub weather_type: Option<String>,
}

impl From<&ConditionValue> for ConditionRecord {
    fn from(value: &ConditionValue) -> Self {
        ConditionRecord {
            coverage: value.coverage.clone(),
            intensity: value.intensity.clone(),
            weather_type: value.weather_type.clone(),
        }
    }
}

pub fn get_hourly_conditions(
    raw_data: &Dwml,
    time_layouts: &TimeLayouts,
) -> Result<TimeMap<Option<ConditionRecord>>, Error> {
    let weather = raw_data.weather()?;
    let time_map = time_map_for(time_layouts, weather)?;
    Ok(normalize_conditions(time_map))
}

/// Fills empty `weather-conditions` with the last condition seen before them, then flattens each
/// condition into a record. Entries before the first condition stay empty.
pub fn normalize_conditions(
    time_map: TimeMap<WeatherConditions>,
) -> TimeMap<Option<ConditionRecord>> {
    let mut last_seen: Option<ConditionValue> = None;
    let filled: TimeMap<Option<ConditionValue>> = time_map
        .into_iter()
        .map(|(time_range, conditions)| {
            if let Some(condition) = conditions.condition() {
                last_seen = Some(condition.clone());
            }
            (time_range, last_seen.clone())
        })
        .collect();

    filled
        .into_iter()
        .map(|(time_range, condition)| (time_range, condition.as_ref().map(ConditionRecord::from)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeRange;
    use time::{macros::datetime, Duration};

    fn condition(coverage: &str, weather_type: &str) -> WeatherConditions {
        WeatherConditions {
            value: vec![ConditionValue {
                coverage: Some(String::from(coverage)),
                intensity: Some(String::from("light")),
                weather_type: Some(String::from(weather_type)),
            }],
        }
    }

    fn record(coverage: &str, weather_type: &str) -> Option<ConditionRecord> {
        Some(ConditionRecord {
            coverage: Some(String::from(coverage)),
            intensity: Some(String::from("light")),
            weather_type: Some(String::from(weather_type)),
        })
    }

    fn hourly(conditions: Vec<WeatherConditions>) -> TimeMap<WeatherConditions> {
        let first = datetime!(2024-03-01 08:00 -5);
        conditions
            .into_iter()
            .enumerate()
            .map(|(hour, conditions)| {
                let start = first + Duration::hours(hour as i64);
                (
                    TimeRange::new(start, Some(start + Duration::hours(1))),
                    conditions,
                )
            })
            .collect()
    }

    fn records(time_map: TimeMap<Option<ConditionRecord>>) -> Vec<Option<ConditionRecord>> {
        time_map.into_iter().map(|(_, record)| record).collect()
    }

    #[test]
    fn carries_condition_forward_over_gaps() {
        let normalized = normalize_conditions(hourly(vec![
            condition("chance", "rain"),
            WeatherConditions::default(),
            WeatherConditions::default(),
            condition("likely", "snow"),
        ]));

        assert_eq!(
            records(normalized),
            vec![
                record("chance", "rain"),
                record("chance", "rain"),
                record("chance", "rain"),
                record("likely", "snow"),
            ]
        );
    }

    #[test]
    fn leading_gaps_stay_empty() {
        let normalized = normalize_conditions(hourly(vec![
            WeatherConditions::default(),
            condition("chance", "rain"),
            WeatherConditions::default(),
        ]));

        assert_eq!(
            records(normalized),
            vec![None, record("chance", "rain"), record("chance", "rain")]
        );
    }

    #[test]
    fn keeps_time_ranges_in_order() {
        let source = hourly(vec![condition("chance", "rain"), WeatherConditions::default()]);
        let ranges: Vec<TimeRange> = source.iter().map(|(range, _)| range.clone()).collect();

        let normalized = normalize_conditions(source);
        assert_eq!(
            normalized.into_iter().map(|(range, _)| range).collect::<Vec<_>>(),
            ranges
        );
    }

    #[test]
    fn serializes_with_attribute_names() {
        let record = ConditionRecord {
            coverage: Some(String::from("chance")),
            intensity: None,
            weather_type: Some(String::from("rain showers")),
        };

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"coverage":"chance","weather-type":"rain showers"}"#
        );
    }
}
