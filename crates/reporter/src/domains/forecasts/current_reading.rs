use crate::{
    build_time_layouts, entry_for_time, get_hourly_conditions, map_values, time_map_for,
    ConditionRecord, Dwml, Error, TimeLayouts, TimeMap,
};
use serde::Serialize;
use slog::{debug, Logger};
use std::fmt;
use time::OffsetDateTime;

/// Requests are made with `unit=e`, so NOAA reports Fahrenheit
pub const TEMPERATURE_UNITS: &str = "F";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CurrentReading {
    pub temp: f64,
    pub units: &'static str,
    pub conditions: Option<ConditionRecord>,
}

/// Status-bar line: `<temp> <units>`, followed by `, <coverage> <intensity> <weather-type>` when known
impl fmt::Display for CurrentReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.temp, self.units)?;
        if let Some(conditions) = &self.conditions {
            write!(
                f,
                ", {} {} {}",
                conditions.coverage.as_deref().unwrap_or_default(),
                conditions.intensity.as_deref().unwrap_or_default(),
                conditions.weather_type.as_deref().unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

pub fn get_hourly_temps(raw_data: &Dwml, time_layouts: &TimeLayouts) -> Result<TimeMap<f64>, Error> {
    let temperature = raw_data.hourly_temperature()?;
    let time_map = time_map_for(time_layouts, temperature)?;
    map_values(time_map, |value| {
        let parsed = value.trim().parse::<f64>();
        parsed.map_err(|source| Error::InvalidValue { value, source })
    })
}

pub fn current_reading(
    logger: &Logger,
    raw_data: &Dwml,
    now: OffsetDateTime,
) -> Result<CurrentReading, Error> {
    let time_layouts = build_time_layouts(raw_data)?;
    debug!(logger, "time layouts: {:?}", time_layouts.keys().collect::<Vec<_>>());

    let temps = get_hourly_temps(raw_data, &time_layouts)?;
    debug!(logger, "hourly temperatures: {}", temps.len());
    let conditions = get_hourly_conditions(raw_data, &time_layouts)?;
    debug!(logger, "hourly conditions: {}", conditions.len());

    let temp = *entry_for_time(&temps, now).ok_or(Error::NoCurrentReading)?;
    let conditions = entry_for_time(&conditions, now).cloned().flatten();

    let reading = CurrentReading {
        temp,
        units: TEMPERATURE_UNITS,
        conditions,
    };
    debug!(logger, "reading for {}: {}", now, reading);
    Ok(reading)
}
