//! Category/sculpture loading from the CMS GraphQL endpoint.

use serde::Serialize;

use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::models::{Category, Envelope};

/// Query sent to the CMS. Sculptures come back most recently modified first.
pub const CATEGORIES_QUERY: &str = r#"{
  categories(first: 500) {
    nodes {
      sculptures(where: {orderby: {field: MODIFIED, order: DESC}}) {
        nodes {
          featuredImage {
            node {
              sourceUrl(size: MEDIUM_LARGE)
            }
          }
          taille_sculpture
          content(format: RENDERED)
          title(format: RENDERED)
        }
      }
      name
      slug
    }
  }
}"#;

/// Moves a JSON request body to the CMS and returns the response body.
///
/// Implementations report transport failures and non-success statuses as
/// [`GalleryError::Network`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: String) -> Result<String>;
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
}

#[derive(Clone, Debug)]
pub struct ContentFetcher {
    endpoint: String,
    excluded_slug: String,
}

impl ContentFetcher {
    pub fn new(endpoint: impl Into<String>, excluded_slug: impl Into<String>) -> Self {
        ContentFetcher {
            endpoint: endpoint.into(),
            excluded_slug: excluded_slug.into(),
        }
    }

    pub fn from_config(config: &GalleryConfig) -> Self {
        Self::new(&config.graphql_endpoint, &config.excluded_category_slug)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn request_body(&self) -> String {
        // Serializing a struct holding a single &str cannot fail.
        serde_json::to_string(&GraphqlRequest {
            query: CATEGORIES_QUERY,
        })
        .unwrap_or_default()
    }

    /// Fetch every category except the reserved uncategorized bucket.
    pub async fn fetch_categories<T: Transport>(&self, transport: &T) -> Result<Vec<Category>> {
        let body = transport.post_json(&self.endpoint, self.request_body()).await?;
        let categories = self.parse(&body)?;
        log::debug!("loaded {} categories from {}", categories.len(), self.endpoint);
        Ok(categories)
    }

    /// Decode a GraphQL response body.
    pub fn parse(&self, body: &str) -> Result<Vec<Category>> {
        let envelope: Envelope = serde_json::from_str(body)
            .map_err(|e| GalleryError::Network(format!("malformed response: {e}")))?;
        if let Some(first) = envelope.errors.first() {
            return Err(GalleryError::Network(format!(
                "CMS reported {} error(s): {}",
                envelope.errors.len(),
                first.message
            )));
        }
        let data = envelope
            .data
            .ok_or_else(|| GalleryError::Network("response carries no data".to_string()))?;
        Ok(data
            .categories
            .nodes
            .into_iter()
            .filter(|c| c.slug != self.excluded_slug)
            .map(Category::from)
            .collect())
    }
}
