//! Turns the regional power outage feed into incident features.
//!
//! A run validates its [`config::FeedInputs`], fetches one
//! [`report::OutageReport`], maps each outage to an
//! [`feature::IncidentFeature`] and hands the whole
//! [`feature::FeatureCollection`] to an [`sink::IncidentSink`].

pub mod config;
pub mod errors;
pub mod feature;
pub mod fetcher;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod sink;
pub mod transformer;
