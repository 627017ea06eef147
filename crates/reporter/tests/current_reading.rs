use reporter::{
    build_time_layouts, current_reading, get_hourly_conditions, get_hourly_temps, parse_dwml,
    ConditionRecord, Error,
};
use slog::{o, Discard, Logger};
use time::macros::datetime;

const FORECAST: &str = include_str!("fixtures/forecast.xml");

fn logger() -> Logger {
    Logger::root(Discard, o!())
}

fn condition(coverage: &str, intensity: &str, weather_type: &str) -> Option<ConditionRecord> {
    Some(ConditionRecord {
        coverage: Some(String::from(coverage)),
        intensity: Some(String::from(intensity)),
        weather_type: Some(String::from(weather_type)),
    })
}

#[test]
fn indexes_every_time_layout() {
    let forecast = parse_dwml(FORECAST).unwrap();
    let layouts = build_time_layouts(&forecast).unwrap();

    assert_eq!(layouts.len(), 3);
    assert_eq!(layouts.get("k-p1h-n4-2").unwrap().len(), 4);
    assert!(layouts
        .get("k-p3h-n3-3")
        .unwrap()
        .iter()
        .all(|range| range.end_time.is_none()));
}

#[test]
fn hourly_series_line_up_with_their_layouts() {
    let forecast = parse_dwml(FORECAST).unwrap();
    let layouts = build_time_layouts(&forecast).unwrap();

    let temps = get_hourly_temps(&forecast, &layouts).unwrap();
    assert_eq!(
        temps.iter().map(|(_, temp)| *temp).collect::<Vec<_>>(),
        vec![44.0, 47.0, 51.0, 54.0]
    );

    let conditions = get_hourly_conditions(&forecast, &layouts).unwrap();
    assert_eq!(
        conditions
            .into_iter()
            .map(|(_, record)| record)
            .collect::<Vec<_>>(),
        vec![
            condition("chance", "light", "rain showers"),
            condition("chance", "light", "rain showers"),
            condition("likely", "moderate", "rain"),
        ]
    );
}

#[test]
fn reports_current_reading_as_json() {
    let forecast = parse_dwml(FORECAST).unwrap();

    let reading = current_reading(&logger(), &forecast, datetime!(2024-03-01 15:30 UTC)).unwrap();
    assert_eq!(
        serde_json::to_string(&reading).unwrap(),
        r#"{"temp":51.0,"units":"F","conditions":{"coverage":"chance","intensity":"light","weather-type":"rain showers"}}"#
    );
}

#[test]
fn reports_latest_values_after_forecast_window() {
    let forecast = parse_dwml(FORECAST).unwrap();

    // every hourly range has ended so the temperature falls back to the first one,
    // while all three open condition ranges match and the last wins
    let reading = current_reading(&logger(), &forecast, datetime!(2024-03-01 16:00 -5)).unwrap();
    assert_eq!(reading.temp, 44.0);
    assert_eq!(reading.conditions, condition("likely", "moderate", "rain"));
}

#[test]
fn empty_layout_has_no_current_reading() {
    let forecast = parse_dwml(
        r#"<dwml version="1.0">
  <data>
    <time-layout time-coordinate="local" summarization="none">
      <layout-key>k-empty</layout-key>
    </time-layout>
    <parameters applicable-location="point1">
      <temperature type="hourly" units="Fahrenheit" time-layout="k-empty">
        <name>Temperature</name>
      </temperature>
      <weather time-layout="k-empty">
        <name>Weather Type, Coverage, and Intensity</name>
      </weather>
    </parameters>
  </data>
</dwml>"#,
    )
    .unwrap();

    let result = current_reading(&logger(), &forecast, datetime!(2024-03-01 09:30 -5));
    match result {
        Err(err @ Error::NoCurrentReading) => {
            assert_eq!(err.to_string(), "No reading for right now")
        }
        other => panic!("expected no current reading, got {:?}", other),
    }
}

#[test]
fn undeclared_layout_is_reported() {
    let forecast = parse_dwml(&FORECAST.replace(
        r#"<weather time-layout="k-p3h-n3-3">"#,
        r#"<weather time-layout="k-p6h-n2-9">"#,
    ))
    .unwrap();

    assert!(matches!(
        current_reading(&logger(), &forecast, datetime!(2024-03-01 09:30 -5)),
        Err(Error::MissingLayout(key)) if key == "k-p6h-n2-9"
    ));
}
