mod remarks;

use crate::config::MinCustomers;
use crate::errors::ParseError;
use crate::feature::{
    FeatureCollection, Geometry, IncidentFeature, IncidentProperties, FEATURE_ID_PREFIX,
    INCIDENT_ICON, INCIDENT_TYPE,
};
use crate::report::{OutageId, OutageRecord, SourcedOutageRecord};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use remarks::RemarksContext;
use shared_kernel::nz_date_time::{parse_instant, NZ_TIME_ZONE};

/// How long a feature without a restoration estimate stays current.
pub const DEFAULT_STALE_AFTER_MILLIS: i64 = 3_600_000;

/// Maps outage records to incident features for one run.
///
/// `generated_at` and `time_zone` are fixed per run so that the output is a
/// pure function of the records.
pub struct Transformer {
    generated_at: DateTime<Utc>,
    time_zone: Tz,
    min_customers: MinCustomers,
}

impl Transformer {
    pub fn new(generated_at: DateTime<Utc>, min_customers: MinCustomers) -> Self {
        Self {
            generated_at,
            time_zone: NZ_TIME_ZONE,
            min_customers,
        }
    }

    pub fn with_time_zone(self, time_zone: Tz) -> Self {
        Self { time_zone, ..self }
    }

    /// One feature per record at or above the customer threshold, in input order.
    pub fn transform(
        &self,
        outages: &[SourcedOutageRecord],
    ) -> Result<FeatureCollection, ParseError> {
        outages
            .iter()
            .filter(|outage| self.min_customers.admits(outage.record.customers_affected))
            .map(|outage| self.to_feature(outage))
            .collect::<Result<FeatureCollection, _>>()
    }

    pub fn to_feature(&self, outage: &SourcedOutageRecord) -> Result<IncidentFeature, ParseError> {
        let record = &outage.record;
        let start = instant(&record.outage_id, "outageStart", &record.outage_start)?;
        let estimated_restoration = record
            .estimated_restoration
            .as_deref()
            .map(|value| instant(&record.outage_id, "estimatedRestoration", value))
            .transpose()?;
        let stale = estimated_restoration.unwrap_or_else(|| self.default_stale());

        let remarks = remarks::compose(&RemarksContext {
            record,
            start,
            estimated_restoration,
            time_zone: self.time_zone,
        });

        let coordinates = record.location.coordinates;
        Ok(IncidentFeature {
            id: feature_id(&record.outage_id),
            properties: IncidentProperties {
                callsign: callsign(record),
                incident_type: INCIDENT_TYPE.to_string(),
                icon: INCIDENT_ICON.to_string(),
                time: start,
                start,
                stale,
                remarks,
                metadata: outage.source.clone(),
            },
            geometry: Geometry::Point {
                coordinates: [coordinates.longitude, coordinates.latitude],
            },
        })
    }

    fn default_stale(&self) -> DateTime<Utc> {
        self.generated_at + Duration::milliseconds(DEFAULT_STALE_AFTER_MILLIS)
    }
}

pub fn feature_id(outage_id: &OutageId) -> String {
    format!("{FEATURE_ID_PREFIX}{outage_id}")
}

/// `<utility> - <first area>`, falling back to the region when no areas are listed.
pub fn callsign(record: &OutageRecord) -> String {
    let place = record
        .location
        .areas
        .first()
        .unwrap_or(&record.region);
    format!("{} - {}", record.utility.name, place)
}

fn instant(
    outage_id: &OutageId,
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, ParseError> {
    parse_instant(value).ok_or_else(|| ParseError::Timestamp {
        outage_id: outage_id.clone(),
        field,
        value: value.to_string(),
    })
}
