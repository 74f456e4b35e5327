use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTOPLAY_INTERVAL_MS, DEFAULT_GRAPHQL_ENDPOINT, DEFAULT_ROUTE, FADE_MS, MOBILE_BREAKPOINT_PX,
    SLUG_SEPARATOR, UNCATEGORIZED_SLUG,
};
use crate::error::{GalleryError, Result};

/// Runtime configuration. Every field is optional in the JSON form and falls
/// back to the values in [`crate::constants`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub graphql_endpoint: String,
    pub default_route: String,
    pub autoplay: bool,
    pub autoplay_interval_ms: u64,
    pub fade_ms: u32,
    pub excluded_category_slug: String,
    pub slug_separator: char,
    pub mobile_breakpoint_px: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            default_route: DEFAULT_ROUTE.to_string(),
            autoplay: true,
            autoplay_interval_ms: AUTOPLAY_INTERVAL_MS,
            fade_ms: FADE_MS,
            excluded_category_slug: UNCATEGORIZED_SLUG.to_string(),
            slug_separator: SLUG_SEPARATOR,
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
        }
    }
}

impl GalleryConfig {
    /// Parse a JSON object, filling in defaults for missing keys.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: GalleryConfig =
            serde_json::from_str(text).map_err(|e| GalleryError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.autoplay_interval_ms == 0 {
            return Err(GalleryError::Config(
                "autoplay_interval_ms must be positive".to_string(),
            ));
        }
        if self.graphql_endpoint.trim().is_empty() {
            return Err(GalleryError::Config("graphql_endpoint is empty".to_string()));
        }
        let route = self.default_route.trim_matches('/');
        if route.is_empty() || route.contains('/') {
            return Err(GalleryError::Config(format!(
                "default_route must be a single path segment, got {:?}",
                self.default_route
            )));
        }
        if !self.slug_separator.is_ascii_punctuation() || self.slug_separator == '/' {
            return Err(GalleryError::Config(format!(
                "slug_separator {:?} would be ambiguous in a path",
                self.slug_separator
            )));
        }
        Ok(())
    }

    /// The default route without surrounding slashes.
    pub fn route(&self) -> &str {
        self.default_route.trim_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = GalleryConfig::from_json("{}").unwrap();
        assert_eq!(cfg, GalleryConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = GalleryConfig::from_json(r#"{"autoplay_interval_ms": 2500, "default_route": "/gallery/"}"#)
            .unwrap();
        assert_eq!(cfg.autoplay_interval_ms, 2500);
        assert_eq!(cfg.route(), "gallery");
        assert_eq!(cfg.fade_ms, FADE_MS);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = GalleryConfig::from_json(r#"{"autoplay_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }

    #[test]
    fn nested_route_is_rejected() {
        assert!(GalleryConfig::from_json(r#"{"default_route": "a/b"}"#).is_err());
    }

    #[test]
    fn separator_must_be_ascii_punctuation() {
        assert!(GalleryConfig::from_json(r#"{"slug_separator": "_"}"#).is_ok());
        for bad in ["a", "/", "é", " "] {
            let json = format!(r#"{{"slug_separator": "{bad}"}}"#);
            assert!(
                matches!(GalleryConfig::from_json(&json), Err(GalleryError::Config(_))),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            GalleryConfig::from_json("{"),
            Err(GalleryError::Config(_))
        ));
    }
}
