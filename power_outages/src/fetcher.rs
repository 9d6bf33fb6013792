use crate::config::FetchFilters;
use crate::errors::{FeedError, ParseError};
use crate::report::OutageReport;
use shared_kernel::http_client::HttpClient;
use url::Url;

pub struct OutageFetcher;

impl Default for OutageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl OutageFetcher {
    pub fn new() -> Self {
        OutageFetcher
    }

    /// Base url plus `minCustomers` (when above zero), `utility` and
    /// `outageType` (when set). Query parameters already on the base url are kept.
    pub fn request_url(filters: &FetchFilters) -> Url {
        let mut params: Vec<(&str, String)> = vec![];
        if filters.min_customers.is_active() {
            params.push(("minCustomers", filters.min_customers.to_string()));
        }
        if let Some(utility) = &filters.utility {
            params.push(("utility", utility.clone()));
        }
        if let Some(outage_type) = &filters.outage_type {
            params.push(("outageType", outage_type.clone()));
        }

        let mut url = filters.api_url.clone();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }

    #[tracing::instrument(err, skip(self, filters), level = "info")]
    pub async fn fetch(&self, filters: &FetchFilters) -> Result<OutageReport, FeedError> {
        let url = Self::request_url(filters);
        tracing::info!(%url, "Fetching power outages");

        let body = HttpClient::get_text(url).await?;
        let report = serde_json::from_str::<OutageReport>(&body).map_err(ParseError::from)?;

        tracing::info!(
            outages = report.outages.len(),
            total_customers_affected = report.summary.total_customers_affected,
            "Fetched power outages"
        );
        Ok(report)
    }
}
