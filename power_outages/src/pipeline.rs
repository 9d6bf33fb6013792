use crate::config::{FeedInputs, FetchFilters};
use crate::errors::FeedError;
use crate::fetcher::OutageFetcher;
use crate::sink::IncidentSink;
use crate::transformer::Transformer;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// One invocation: validate inputs, fetch, transform, submit. Nothing is kept
/// between runs, and the sink is only called once the whole collection is built.
pub struct OutageFeed {
    fetcher: OutageFetcher,
    sink: Arc<dyn IncidentSink>,
    clock: Arc<dyn Clock>,
}

impl OutageFeed {
    pub fn new(sink: Arc<dyn IncidentSink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            fetcher: OutageFetcher::new(),
            sink,
            clock,
        }
    }

    /// Returns the number of features submitted.
    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn run(&self, inputs: &FeedInputs) -> Result<usize, FeedError> {
        let filters = FetchFilters::try_from(inputs)?;

        let report = self.fetcher.fetch(&filters).await?;

        let collection =
            Transformer::new(self.clock.now(), filters.min_customers).transform(&report.outages)?;

        self.sink
            .submit(&collection)
            .await
            .map_err(FeedError::Submission)?;

        tracing::info!(features = collection.len(), "Submitted power outage incidents");
        Ok(collection.len())
    }
}
