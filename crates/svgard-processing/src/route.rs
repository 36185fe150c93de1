//! `get_svg/<id>` route: serves the sanitized document for a catalog id.

use std::sync::Arc;

use svgard_core::constants::SERVE_ROUTE_PREFIX;
use svgard_core::parse::leading_integer;

use crate::catalog::{ImageCatalog, ImageId};
use crate::upload::{ServeError, ServedDocument, UploadHandler};

/// Result of resolving a request path.
#[derive(Debug)]
pub enum RouteOutcome {
    Served(ServedDocument),
    /// The path matched but no stored image answers to the id.
    NotFound,
    /// The path is not ours; the host renders its own 404 page.
    NoHandler { path: String },
}

pub struct ServeRoute {
    catalog: Arc<dyn ImageCatalog>,
    handler: Arc<dyn UploadHandler>,
}

impl ServeRoute {
    pub fn new(catalog: Arc<dyn ImageCatalog>, handler: Arc<dyn UploadHandler>) -> Self {
        Self { catalog, handler }
    }

    /// Id argument if `path` is `get_svg/<id>[/...]`. A missing or
    /// non-numeric id coerces to 0, which names no image.
    pub fn match_path(path: &str) -> Option<ImageId> {
        let mut segments = path.trim_start_matches('/').split('/');
        if segments.next()? != SERVE_ROUTE_PREFIX {
            return None;
        }
        let id = segments.next().map(leading_integer).unwrap_or(0);
        Some(ImageId(id))
    }

    pub async fn resolve(&self, path: &str) -> Result<RouteOutcome, ServeError> {
        let Some(id) = Self::match_path(path) else {
            tracing::debug!(path = %path, "Hit 404: no handler for path");
            return Ok(RouteOutcome::NoHandler {
                path: path.to_string(),
            });
        };

        let Some(hash) = self.catalog.hash_for(id).await else {
            tracing::debug!(image_id = %id, "Unknown image id");
            return Ok(RouteOutcome::NotFound);
        };

        match self.handler.serve(&hash).await {
            Ok(document) => Ok(RouteOutcome::Served(document)),
            Err(ServeError::NotFound(_)) => {
                tracing::debug!(image_id = %id, hash = %hash, "Catalogued image has no stored document");
                Ok(RouteOutcome::NotFound)
            }
            Err(e) => Err(e),
        }
    }
}
