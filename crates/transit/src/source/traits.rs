//! Pluggable feature retrieval.
//!
//! The library never performs IO itself; callers implement this over HTTP,
//! local files or fixtures.

use std::future::Future;
use std::pin::Pin;

use crate::models::types::Result;
use crate::source::arcgis::Feature;

/// Fetch every feature of one ArcGIS feature service
pub trait FeatureSource: Send + Sync {
    fn fetch_features<'a>(
        &'a self,
        service: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Feature>>> + Send + 'a>>;
}
