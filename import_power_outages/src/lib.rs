use anyhow::Context;
use power_outages::config::FeedInputs;
use power_outages::sink::SubmissionConfig;
use serde::Deserialize;
use shared_kernel::configuration::config;

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub outages: FeedInputs,
    pub submission: SubmissionConfig,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to deserialize settings to import_power_outages settings")
    }
}

/// Settings for a dry run, which never submits and so needs no sink.
#[derive(Debug, Deserialize)]
pub struct DryRunSettings {
    #[serde(default)]
    pub outages: FeedInputs,
}

impl DryRunSettings {
    pub fn parse() -> anyhow::Result<DryRunSettings> {
        config::<DryRunSettings>().context("Failed to deserialize settings for the dry run")
    }
}

#[cfg(test)]
mod tests {
    use super::{DryRunSettings, Settings};
    use secrecy::ExposeSecret;
    use serde_json::json;

    #[test]
    fn test_settings_read_the_outage_inputs_and_the_sink() {
        let settings: Settings = serde_json::from_value(json!({
            "outages": { "api_url": "http://localhost/outages", "min_customers": "50" },
            "submission": { "host": "http://localhost/incidents", "auth_token": "token" }
        }))
        .unwrap();

        assert_eq!(settings.outages.min_customers, "50");
        assert_eq!(settings.outages.utility_filter, None);
        assert_eq!(settings.submission.host.as_str(), "http://localhost/incidents");
        assert_eq!(settings.submission.auth_token.expose_secret(), "token");
    }

    #[test]
    fn test_dry_run_uses_defaults_when_outages_are_not_configured() {
        let settings: DryRunSettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(settings.outages.min_customers, "0");
    }
}
