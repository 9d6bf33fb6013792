use crate::errors::FeedError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.outages.nz/v1/outages";
const DEFAULT_MIN_CUSTOMERS: &str = "0";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_min_customers() -> String {
    DEFAULT_MIN_CUSTOMERS.to_string()
}

/// Raw inputs as the hosting environment supplies them. The display names are
/// what operators see; the snake_case aliases are what the `configuration/`
/// files and `APP_OUTAGES__*` variables use.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct FeedInputs {
    /// Base endpoint of the outage aggregation API.
    #[serde(rename = "API_URL", alias = "api_url", default = "default_api_url")]
    pub api_url: String,
    /// Only outages affecting at least this many customers are fetched.
    #[serde(
        rename = "Min Customers",
        alias = "min_customers",
        default = "default_min_customers"
    )]
    pub min_customers: String,
    /// Exact utility identifier to restrict the query to.
    #[serde(rename = "Utility Filter", alias = "utility_filter", default)]
    pub utility_filter: Option<String>,
    /// `planned` or `unplanned`.
    #[serde(rename = "Outage Type", alias = "outage_type", default)]
    pub outage_type: Option<String>,
}

impl Default for FeedInputs {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            min_customers: default_min_customers(),
            utility_filter: None,
            outage_type: None,
        }
    }
}

/// A validated, non-negative customer threshold.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct MinCustomers(f64);

impl MinCustomers {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_active(&self) -> bool {
        self.0 > 0.0
    }

    pub fn admits(&self, customers_affected: u64) -> bool {
        customers_affected as f64 >= self.0
    }
}

impl TryFrom<&str> for MinCustomers {
    type Error = FeedError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(MinCustomers::default());
        }
        let parsed = trimmed.parse::<f64>().map_err(|_| {
            FeedError::Configuration(format!("Min Customers must be a number, got {value:?}"))
        })?;
        if !parsed.is_finite() || parsed < 0.0 {
            return Err(FeedError::Configuration(format!(
                "Min Customers must be a non-negative number, got {value:?}"
            )));
        }
        Ok(MinCustomers(parsed))
    }
}

impl fmt::Display for MinCustomers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Everything the fetcher needs, checked before any request is made.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFilters {
    pub api_url: Url,
    pub min_customers: MinCustomers,
    pub utility: Option<String>,
    pub outage_type: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

impl TryFrom<&FeedInputs> for FetchFilters {
    type Error = FeedError;

    fn try_from(inputs: &FeedInputs) -> Result<Self, Self::Error> {
        let min_customers = MinCustomers::try_from(inputs.min_customers.as_str())?;
        let api_url = Url::parse(inputs.api_url.trim()).map_err(|err| {
            FeedError::Configuration(format!("API_URL {:?} is not a valid url: {err}", inputs.api_url))
        })?;
        Ok(FetchFilters {
            api_url,
            min_customers,
            utility: non_blank(&inputs.utility_filter),
            outage_type: non_blank(&inputs.outage_type),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn inputs(min_customers: &str) -> FeedInputs {
        FeedInputs {
            min_customers: min_customers.to_string(),
            ..FeedInputs::default()
        }
    }

    #[rstest]
    #[case("0", 0.0)]
    #[case("50", 50.0)]
    #[case(" 12 ", 12.0)]
    #[case("2.5", 2.5)]
    #[case("", 0.0)]
    fn test_valid_min_customers(#[case] input: &str, #[case] expected: f64) {
        let filters = FetchFilters::try_from(&inputs(input)).expect("Expected valid filters");
        assert_eq!(filters.min_customers.value(), expected);
    }

    #[rstest]
    #[case("-5")]
    #[case("-0.1")]
    #[case("lots")]
    #[case("NaN")]
    #[case("inf")]
    fn test_invalid_min_customers_is_a_configuration_error(#[case] input: &str) {
        let result = FetchFilters::try_from(&inputs(input));
        assert!(matches!(result, Err(FeedError::Configuration(_))));
    }

    #[test]
    fn test_invalid_api_url_is_a_configuration_error() {
        let inputs = FeedInputs {
            api_url: "not a url".to_string(),
            ..FeedInputs::default()
        };
        let result = FetchFilters::try_from(&inputs);
        assert!(matches!(result, Err(FeedError::Configuration(_))));
    }

    #[test]
    fn test_blank_filters_are_treated_as_unset() {
        let inputs = FeedInputs {
            utility_filter: Some("  ".to_string()),
            outage_type: Some("planned".to_string()),
            ..FeedInputs::default()
        };
        let filters = FetchFilters::try_from(&inputs).unwrap();
        assert_eq!(filters.utility, None);
        assert_eq!(filters.outage_type.as_deref(), Some("planned"));
    }

    #[test]
    fn test_min_customers_threshold_is_inclusive() {
        let threshold = MinCustomers::try_from("100").unwrap();
        assert!(threshold.admits(100));
        assert!(threshold.admits(101));
        assert!(!threshold.admits(99));
        assert!(MinCustomers::default().admits(0));
    }

    #[test]
    fn test_inputs_accept_display_names_and_snake_case() {
        let display: FeedInputs = serde_json::from_value(serde_json::json!({
            "API_URL": "http://localhost/outages",
            "Min Customers": "10",
            "Utility Filter": "vector",
        }))
        .unwrap();
        let snake_case: FeedInputs = serde_json::from_value(serde_json::json!({
            "api_url": "http://localhost/outages",
            "min_customers": "10",
            "utility_filter": "vector",
        }))
        .unwrap();

        assert_eq!(display, snake_case);
        assert_eq!(display.outage_type, None);
    }

    #[test]
    fn test_inputs_fall_back_to_defaults() {
        let parsed: FeedInputs = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(parsed, FeedInputs::default());
        assert_eq!(parsed.api_url, DEFAULT_API_URL);
        assert_eq!(parsed.min_customers, "0");
    }
}
