//! Declarative descriptions of what the feed accepts and what each record
//! looks like, for tooling that introspects the feed.

use crate::config::FeedInputs;
use crate::report::OutageRecord;
use schemars::schema::RootSchema;
use schemars::schema_for;

pub fn input_schema() -> RootSchema {
    schema_for!(FeedInputs)
}

pub fn output_schema() -> RootSchema {
    schema_for!(OutageRecord)
}
