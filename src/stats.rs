use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::Index;

use crate::indicators::Indicator;

/// The sixteen indicator values, serialized as a map keyed by indicator name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterVector {
    values: [i64; Indicator::COUNT],
}

impl ParameterVector {
    pub(crate) fn new(values: [i64; Indicator::COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, indicator: Indicator) -> i64 {
        self.values[indicator as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Indicator, i64)> + '_ {
        Indicator::ALL.iter().map(|&i| (i, self.get(i)))
    }

    pub fn flagged(&self) -> Vec<Indicator> {
        self.iter()
            .filter(|(i, v)| i.is_flagged(*v))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn to_vector(&self) -> Vec<f64> {
        self.values.iter().map(|&v| v as f64).collect()
    }
}

impl Index<Indicator> for ParameterVector {
    type Output = i64;

    fn index(&self, indicator: Indicator) -> &i64 {
        &self.values[indicator as usize]
    }
}

impl Serialize for ParameterVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Indicator::COUNT))?;
        for (indicator, value) in self.iter() {
            map.serialize_entry(indicator.name(), &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub urls_found: usize,
    pub domains_analyzed: usize,
    pub content_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnalysisResult {
    pub parameters: ParameterVector,
    pub metadata: Metadata,
}
