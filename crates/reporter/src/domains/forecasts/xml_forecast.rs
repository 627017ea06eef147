use crate::{Error, TimeSeries};
use serde::{Deserialize, Serialize};

/*
Shape of the NDFD (National Digital Forecast Database) DWML time-series product:
https://graphical.weather.gov/xml/docs/elementInputNames.php

<dwml>
  <data>
    <time-layout>layout-key, start-valid-time*, end-valid-time*</time-layout>
    <parameters>
      <temperature type="hourly" time-layout="..."> value* </temperature>
      <weather time-layout="..."> weather-conditions* </weather>
    </parameters>
  </data>
</dwml>
*/
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename = "dwml")]
pub struct Dwml {
    #[serde(rename = "data")]
    pub data: Data,
}

impl Dwml {
    /// The `temperature[@type='hourly']` series, taken from the first parameters block carrying one
    pub fn hourly_temperature(&self) -> Result<&Temperature, Error> {
        self.data
            .parameters
            .iter()
            .flat_map(|parameters| parameters.temperature.iter())
            .find(|temperature| temperature.reading_type == HOURLY)
            .ok_or(Error::MissingElement("temperature[@type='hourly']"))
    }

    pub fn weather(&self) -> Result<&Weather, Error> {
        self.data
            .parameters
            .iter()
            .find_map(|parameters| parameters.weather.as_ref())
            .ok_or(Error::MissingElement("weather"))
    }
}

pub const HOURLY: &str = "hourly";

pub fn parse_dwml(xml: &str) -> Result<Dwml, Error> {
    let dwml: Dwml = serde_xml_rs::from_str(xml)?;
    Ok(dwml)
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Data {
    #[serde(rename = "time-layout", default)]
    pub time_layout: Vec<TimeLayout>,

    #[serde(rename = "parameters", default)]
    pub parameters: Vec<Parameters>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TimeLayout {
    #[serde(rename = "time-coordinate", default)]
    pub time_coordinate: Option<String>,

    #[serde(rename = "summarization", default)]
    pub summarization: Option<String>,

    // children arrive in document order: layout-key, then start/end valid times
    #[serde(rename = "$value", default)]
    pub time: Vec<Time>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub enum Time {
    #[serde(rename = "layout-key")]
    LayoutKey(String),
    #[serde(rename = "start-valid-time")]
    StartTime(String),
    #[serde(rename = "end-valid-time")]
    EndTime(String),
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Parameters {
    #[serde(rename = "applicable-location", default)]
    pub applicable_location: Option<String>,

    #[serde(rename = "temperature", default)]
    // holds hourly, maximum, minimum, dew point...
    pub temperature: Vec<Temperature>,

    #[serde(rename = "weather", default)]
    pub weather: Option<Weather>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Temperature {
    #[serde(rename = "type")]
    pub reading_type: String,

    #[serde(rename = "units", default)]
    pub units: Option<String>,

    #[serde(rename = "time-layout")]
    pub time_layout: String,

    #[serde(rename = "value", default)]
    pub value: Vec<String>,
}

impl TimeSeries for Temperature {
    type Item = String;

    fn time_layout(&self) -> &str {
        &self.time_layout
    }

    fn items(&self) -> &[String] {
        &self.value
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Weather {
    #[serde(rename = "time-layout")]
    pub time_layout: String,

    #[serde(rename = "weather-conditions", default)]
    pub weather_conditions: Vec<WeatherConditions>,
}

impl TimeSeries for Weather {
    type Item = WeatherConditions;

    fn time_layout(&self) -> &str {
        &self.time_layout
    }

    fn items(&self) -> &[WeatherConditions] {
        &self.weather_conditions
    }
}

/// NOAA leaves this empty when the conditions did not change since the previous time range
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct WeatherConditions {
    #[serde(rename = "value", default)]
    pub value: Vec<ConditionValue>,
}

impl WeatherConditions {
    // additional values are joined with `additive="and"`, the first one leads
    pub fn condition(&self) -> Option<&ConditionValue> {
        self.value.first()
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct ConditionValue {
    #[serde(rename = "coverage", default)]
    pub coverage: Option<String>,

    #[serde(rename = "intensity", default)]
    pub intensity: Option<String>,

    #[serde(rename = "weather-type", default)]
    pub weather_type: Option<String>,
}
