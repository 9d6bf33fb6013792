use crate::report::OutageRecord;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use itertools::Itertools;
use shared_kernel::nz_date_time::format_nz_display;
use std::fmt::Display;

const UNKNOWN: &str = "Unknown";

/// Ordered `label: value` lines; optional lines are skipped, never blanked.
#[derive(Default)]
struct RemarksBuilder {
    lines: Vec<String>,
}

impl RemarksBuilder {
    fn line(mut self, label: &str, value: impl Display) -> Self {
        self.lines.push(format!("{label}: {value}"));
        self
    }

    fn line_if<V: Display>(self, include: bool, label: &str, value: impl FnOnce() -> V) -> Self {
        if include {
            return self.line(label, value());
        }
        self
    }

    fn optional_line<V: Display>(self, label: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.line(label, value),
            None => self,
        }
    }

    fn build(self) -> String {
        self.lines.join("\n")
    }
}

/// Everything the remarks need, with timestamps already resolved.
pub(crate) struct RemarksContext<'a> {
    pub record: &'a OutageRecord,
    pub start: DateTime<Utc>,
    pub estimated_restoration: Option<DateTime<Utc>>,
    pub time_zone: Tz,
}

pub(crate) fn compose(context: &RemarksContext) -> String {
    let record = context.record;
    let location = &record.location;
    let metadata = record.metadata.as_ref();

    let areas = if location.areas.is_empty() {
        UNKNOWN.to_string()
    } else {
        location.areas.iter().join(", ")
    };

    RemarksBuilder::default()
        .line("Utility", &record.utility.name)
        .line("Customers Affected", record.customers_affected)
        .line("Status", &record.status)
        .line("Cause", &record.cause)
        .line("Region", &record.region)
        .line("Areas", areas)
        .line_if(!location.streets.is_empty(), "Streets", || {
            location.streets.iter().join(", ")
        })
        .line(
            "Outage Start",
            format_nz_display(&context.start, context.time_zone),
        )
        .optional_line(
            "Estimated Restoration",
            context
                .estimated_restoration
                .map(|restoration| format_nz_display(&restoration, context.time_zone)),
        )
        .optional_line("Type", record.outage_type.as_ref())
        .optional_line("Crew Status", record.crew_status.as_ref())
        .optional_line("Feeder", metadata.and_then(|metadata| metadata.feeder.as_ref()))
        .line_if(
            metadata.map_or(false, |metadata| metadata.aggregation_type.is_some()),
            "Aggregated",
            || {
                let count = metadata
                    .and_then(|metadata| metadata.outage_count)
                    .map_or_else(|| UNKNOWN.to_string(), |count| count.to_string());
                format!("{count} outages")
            },
        )
        .build()
}
