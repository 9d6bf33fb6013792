use crate::feature::FeatureCollection;
use anyhow::Context;
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use shared_kernel::http_client::HttpClient;
use std::collections::HashMap;
use std::io::Write;
use url::Url;

/// Receives the whole collection of a run in a single call.
#[async_trait]
pub trait IncidentSink: Send + Sync {
    async fn submit(&self, collection: &FeatureCollection) -> anyhow::Result<()>;
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubmissionConfig {
    pub host: Url,
    pub auth_token: Secret<String>,
}

pub struct HttpIncidentSink {
    config: SubmissionConfig,
}

impl HttpIncidentSink {
    pub fn new(config: SubmissionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl IncidentSink for HttpIncidentSink {
    #[tracing::instrument(err, skip(self, collection), fields(features = collection.len()), level = "info")]
    async fn submit(&self, collection: &FeatureCollection) -> anyhow::Result<()> {
        let auth_token = self.config.auth_token.expose_secret();
        let bearer_token = format!("Bearer {auth_token}");
        let headers = HashMap::from([("Authorization", bearer_token)]);

        HttpClient::post_json(self.config.host.clone(), headers, collection)
            .await
            .map(|_| ())
            .with_context(|| format!("Failed to submit incidents to {}", self.config.host))
    }
}

/// Prints the collection instead of submitting it.
pub struct StdoutSink;

#[async_trait]
impl IncidentSink for StdoutSink {
    async fn submit(&self, collection: &FeatureCollection) -> anyhow::Result<()> {
        let as_json = serde_json::to_string_pretty(collection)
            .context("Failed to convert the collection to json")?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{as_json}").context("Failed to write the collection to stdout")
    }
}
