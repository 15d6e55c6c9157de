//! Result data types.
//!
//! On the wire a result is one flat JSON object: a `time` array plus one
//! `{"v": [...], "i": [...]}` entry per component, keyed by netlist name.
//! Component order is kept as the solver wrote it.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ResultsError, ResultsResult};

const TIME_KEY: &str = "time";

/// Voltage across and current through one component, sampled at each time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSeries {
    /// Volts.
    pub v: Vec<f64>,
    /// Amps.
    pub i: Vec<f64>,
}

/// A full transient result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationResult {
    /// Seconds.
    pub time: Vec<f64>,
    pub components: Vec<(String, ComponentSeries)>,
}

impl SimulationResult {
    pub fn component(&self, name: &str) -> Option<&ComponentSeries> {
        self.components
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|(n, _)| n.as_str())
    }

    pub fn sample_count(&self) -> usize {
        self.time.len()
    }

    /// Check every series has exactly one sample per time point.
    pub fn check_lengths(&self) -> ResultsResult<()> {
        let expected = self.time.len();
        for (name, series) in &self.components {
            for (label, values) in [("v", &series.v), ("i", &series.i)] {
                if values.len() != expected {
                    return Err(ResultsError::SeriesLength {
                        component: name.clone(),
                        series: label,
                        len: values.len(),
                        expected,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Serialize for SimulationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.components.len() + 1))?;
        map.serialize_entry(TIME_KEY, &self.time)?;
        for (name, series) in &self.components {
            map.serialize_entry(name, series)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SimulationResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ResultVisitor)
    }
}

struct ResultVisitor;

impl<'de> Visitor<'de> for ResultVisitor {
    type Value = SimulationResult;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with a `time` array and {v, i} series per component")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut time: Option<Vec<f64>> = None;
        let mut components: Vec<(String, ComponentSeries)> = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == TIME_KEY {
                if time.is_some() {
                    return Err(de::Error::duplicate_field(TIME_KEY));
                }
                time = Some(map.next_value()?);
            } else {
                if components.iter().any(|(n, _)| *n == key) {
                    return Err(de::Error::custom(format!("duplicate component `{}`", key)));
                }
                let series: ComponentSeries = map.next_value()?;
                components.push((key, series));
            }
        }

        let time = time.ok_or_else(|| de::Error::missing_field(TIME_KEY))?;
        Ok(SimulationResult { time, components })
    }
}
