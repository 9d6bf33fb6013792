use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every feature id; the rest is the upstream outage id.
pub const FEATURE_ID_PREFIX: &str = "poweroutage-";
/// Ground installation / utility / electric.
pub const INCIDENT_TYPE: &str = "a-f-G-I-U-E";
pub const INCIDENT_ICON: &str = "Incidents/INC.31.PowerOutage.png";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `[longitude, latitude]`
    Point { coordinates: [f64; 2] },
}

/// Instants are always written as `YYYY-MM-DDTHH:MM:SS.sssZ`.
mod millis_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IncidentProperties {
    pub callsign: String,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub icon: String,
    #[serde(with = "millis_timestamp")]
    pub time: DateTime<Utc>,
    #[serde(with = "millis_timestamp")]
    pub start: DateTime<Utc>,
    #[serde(with = "millis_timestamp")]
    pub stale: DateTime<Utc>,
    pub remarks: String,
    pub metadata: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename = "Feature")]
pub struct IncidentFeature {
    pub id: String,
    pub properties: IncidentProperties,
    pub geometry: Geometry,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<IncidentFeature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<IncidentFeature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = IncidentFeature>>(iter: T) -> Self {
        FeatureCollection {
            features: iter.into_iter().collect(),
        }
    }
}
