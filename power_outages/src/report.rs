use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use shared_kernel::string_key;

string_key!(OutageId);

/// Envelope returned by the outage aggregation API.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutageReport {
    pub version: String,
    pub timestamp: String,
    pub summary: ReportSummary,
    #[serde(default)]
    pub utilities: Vec<UtilityDescriptor>,
    pub outages: Vec<SourcedOutageRecord>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_utilities: u64,
    pub total_outages: u64,
    pub total_customers_affected: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UtilityDescriptor {
    pub id: String,
    pub name: String,
    /// Anything else the API tells us about the utility. Not interpreted.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutageRecord {
    #[schemars(with = "String")]
    pub outage_id: OutageId,
    pub utility: UtilityRef,
    pub region: String,
    pub region_code: String,
    pub outage_start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_restoration: Option<String>,
    pub cause: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outage_type: Option<String>,
    pub customers_affected: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_status: Option<String>,
    pub location: OutageLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OutageMetadata>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct UtilityRef {
    pub name: String,
    pub id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct OutageLocation {
    pub coordinates: Coordinates,
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub streets: Vec<String>,
}

/// WGS84 decimal degrees. Passed through as received.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, JsonSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outage_count: Option<u64>,
}

/// An outage record together with the exact JSON object it was read from, so
/// the record can be forwarded downstream without losing fields we don't model.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedOutageRecord {
    pub record: OutageRecord,
    pub source: Value,
}

impl SourcedOutageRecord {
    pub fn from_source(source: Value) -> Result<Self, serde_json::Error> {
        let record = OutageRecord::deserialize(&source)?;
        Ok(Self { record, source })
    }
}

impl<'de> Deserialize<'de> for SourcedOutageRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let source = Value::deserialize(deserializer)?;
        SourcedOutageRecord::from_source(source).map_err(D::Error::custom)
    }
}

impl Serialize for SourcedOutageRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.source.serialize(serializer)
    }
}
