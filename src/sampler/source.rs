//! Weather sources the sampler can poll.

use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::config::WeatherConfig;
use crate::error::{Result, WeatherglassError};
use crate::reading::Reading;

/// Something that can produce a live [`Reading`]
pub trait WeatherSource: Send + Sync {
    /// Fetch a fresh reading
    fn fetch(&self) -> impl Future<Output = Result<Reading>> + Send;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Weather endpoint reached over HTTP, imperial units
#[derive(Debug, Clone)]
pub struct HttpWeatherSource {
    client: Client,
    endpoint: String,
    latitude: f64,
    longitude: f64,
    api_key: Option<String>,
}

impl HttpWeatherSource {
    /// Build a source from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherglassError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
            api_key: config.api_key.clone(),
        })
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("lat", self.latitude.to_string()),
            ("lon", self.longitude.to_string()),
            ("units", "imperial".to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("appid", key.clone()));
        }
        query
    }
}

impl WeatherSource for HttpWeatherSource {
    fn fetch(&self) -> impl Future<Output = Result<Reading>> + Send {
        async move {
            let response = self
                .client
                .get(&self.endpoint)
                .query(&self.query())
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(WeatherglassError::Fetch {
                    message: format!("endpoint returned HTTP {}", status),
                });
            }

            let body = response.text().await?;
            debug!(bytes = body.len(), "Weather response received");
            Reading::from_json(&body)
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} (lat={}, lon={})",
            self.endpoint, self.latitude, self.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_includes_key_only_when_configured() {
        let mut config = WeatherConfig::default();
        config.api_key = None;
        let source = HttpWeatherSource::new(&config).unwrap();
        let query = source.query();
        assert!(query.iter().any(|(k, v)| *k == "units" && v == "imperial"));
        assert!(!query.iter().any(|(k, _)| *k == "appid"));

        config.api_key = Some("secret".to_string());
        let source = HttpWeatherSource::new(&config).unwrap();
        assert!(source
            .query()
            .iter()
            .any(|(k, v)| *k == "appid" && v == "secret"));
    }

    #[test]
    fn test_describe_names_location() {
        let source = HttpWeatherSource::new(&WeatherConfig::default()).unwrap();
        let description = source.describe();
        assert!(description.contains("lat=40.7128"));
        assert!(description.contains("lon=-74.006"));
    }
}
