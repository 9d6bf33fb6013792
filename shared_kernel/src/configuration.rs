use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";
const DEFAULT_ENVIRONMENT: &str = "base";

/// Loads `configuration/<APP_ENVIRONMENT>.yaml` from the current directory and
/// overlays any `APP_`-prefixed environment variables on top of it.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    let environment =
        std::env::var(ENVIRONMENT_VARIABLE).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
    config_in(&base_path.join("configuration"), &environment)
}

/// Loads `<configuration_directory>/<environment>.yaml` with the `APP_` overlay.
pub fn config_in<Settings: DeserializeOwned>(
    configuration_directory: &Path,
    environment: &str,
) -> anyhow::Result<Settings> {
    let file = configuration_directory.join(format!("{environment}.yaml"));
    let settings = config::Config::builder()
        .add_source(config::File::from(file.clone()))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to build configuration from {}", file.display()))?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}

#[cfg(test)]
mod tests {
    use super::config_in;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct Upstream {
        api_url: String,
        min_customers: String,
    }

    #[derive(Deserialize, Debug)]
    struct Settings {
        upstream: Upstream,
    }

    #[test]
    fn test_settings_are_read_from_the_base_file() {
        let directory = std::env::temp_dir().join("shared_kernel_configuration_test");
        std::fs::create_dir_all(&directory).unwrap();
        std::fs::write(
            directory.join("base.yaml"),
            "upstream:\n  api_url: \"http://localhost:9000/outages\"\n  min_customers: \"25\"\n",
        )
        .unwrap();

        let settings = config_in::<Settings>(&directory, "base").expect("Expected settings to load");

        assert_eq!(settings.upstream.api_url, "http://localhost:9000/outages");
        assert_eq!(settings.upstream.min_customers, "25");
    }

    #[test]
    fn test_missing_configuration_file_is_an_error() {
        let directory = std::env::temp_dir().join("shared_kernel_configuration_missing");
        let result = config_in::<Settings>(&directory, "base");
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_selects_the_configuration_file() {
        let directory = std::env::temp_dir().join("shared_kernel_configuration_environments");
        std::fs::create_dir_all(&directory).unwrap();
        std::fs::write(
            directory.join("base.yaml"),
            "upstream:\n  api_url: \"http://localhost:9000/outages\"\n  min_customers: \"0\"\n",
        )
        .unwrap();
        std::fs::write(
            directory.join("production.yaml"),
            "upstream:\n  api_url: \"https://api.outages.nz/v1/outages\"\n  min_customers: \"100\"\n",
        )
        .unwrap();

        let base = config_in::<Settings>(&directory, "base").unwrap();
        let production = config_in::<Settings>(&directory, "production").unwrap();

        assert_eq!(base.upstream.min_customers, "0");
        assert_eq!(production.upstream.api_url, "https://api.outages.nz/v1/outages");
        assert_eq!(production.upstream.min_customers, "100");
    }
}
