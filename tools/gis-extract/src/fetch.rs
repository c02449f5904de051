use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use yerevan_transit::source::{Feature, FeatureSet, FeatureSource, ServiceEndpoints};
use yerevan_transit::{Result, TransitError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn source_error(service: &str, message: impl ToString) -> TransitError {
    TransitError::Source {
        service: service.to_string(),
        message: message.to_string(),
    }
}

/// Queries the live ArcGIS REST endpoints
pub struct HttpSource {
    client: reqwest::Client,
    endpoints: ServiceEndpoints,
}

impl HttpSource {
    pub fn new(endpoints: ServiceEndpoints) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, endpoints })
    }

    async fn fetch(&self, service: &str) -> Result<Vec<Feature>> {
        let url = self.endpoints.query_url(service);
        log::debug!("  Fetching: {url}");

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| source_error(service, e))?
            .text()
            .await
            .map_err(|e| source_error(service, e))?;

        let features = FeatureSet::from_json(service, &body)?.into_features(service)?;
        log::info!("  Retrieved {} features", features.len());
        Ok(features)
    }
}

impl FeatureSource for HttpSource {
    fn fetch_features<'a>(
        &'a self,
        service: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Feature>>> + Send + 'a>> {
        Box::pin(self.fetch(service))
    }
}

/// Reads previously saved query responses, one file per layer
pub struct FileSource {
    bus_service: String,
    bus_path: PathBuf,
    metro_path: Option<PathBuf>,
}

impl FileSource {
    pub fn new(endpoints: &ServiceEndpoints, bus_path: PathBuf, metro_path: Option<PathBuf>) -> Self {
        Self {
            bus_service: endpoints.bus_service.clone(),
            bus_path,
            metro_path,
        }
    }

    async fn read(&self, service: &str) -> Result<Vec<Feature>> {
        let path = if service == self.bus_service {
            &self.bus_path
        } else {
            match &self.metro_path {
                Some(path) => path,
                None => {
                    log::warn!("  No file given for {service}; continuing without it");
                    return Ok(Vec::new());
                }
            }
        };

        log::debug!("  Reading: {}", path.display());
        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| source_error(service, format!("{}: {e}", path.display())))?;
        FeatureSet::from_json(service, &body)?.into_features(service)
    }
}

impl FeatureSource for FileSource {
    fn fetch_features<'a>(
        &'a self,
        service: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Feature>>> + Send + 'a>> {
        Box::pin(self.read(service))
    }
}
