use serde::{Deserialize, Serialize};

use crate::slug::{decode_entities, slugify};

/// A single artwork.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sculpture {
    pub title: String,
    /// Rendered rich text (HTML) from the CMS.
    pub content: String,
    /// Dimensions label, e.g. "120 x 45 cm".
    pub size: Option<String>,
    /// Empty when the CMS has no featured image for this sculpture.
    pub featured_image_url: String,
}

impl Sculpture {
    pub fn slug(&self, separator: char) -> String {
        slugify(&self.title, separator)
    }
}

/// A named series of sculptures, in CMS order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub sculptures: Vec<Sculpture>,
}

impl Category {
    pub fn len(&self) -> usize {
        self.sculptures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sculptures.is_empty()
    }

    /// Sculpture at a 1-based index.
    pub fn sculpture(&self, index: usize) -> Option<&Sculpture> {
        index.checked_sub(1).and_then(|i| self.sculptures.get(i))
    }

    /// 1-based index of the sculpture whose title slugifies to `slug`.
    pub fn position_of(&self, slug: &str, separator: char) -> Option<usize> {
        self.sculptures
            .iter()
            .position(|s| s.slug(separator) == slug)
            .map(|i| i + 1)
    }
}

// GraphQL wire shapes. Everything the gallery can live without is optional so a
// single incomplete node does not fail the whole load.

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub data: Option<CategoriesData>,
    #[serde(default)]
    pub errors: Vec<WireError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesData {
    pub categories: Connection<WireCategory>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub sculptures: Option<Connection<WireSculpture>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSculpture {
    pub title: Option<String>,
    pub content: Option<String>,
    pub taille_sculpture: Option<String>,
    #[serde(rename = "featuredImage")]
    pub featured_image: Option<WireImageEdge>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireImageEdge {
    pub node: Option<WireImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireImage {
    #[serde(rename = "sourceUrl")]
    pub source_url: Option<String>,
}

impl From<WireSculpture> for Sculpture {
    fn from(w: WireSculpture) -> Self {
        let featured_image_url = w
            .featured_image
            .and_then(|edge| edge.node)
            .and_then(|node| node.source_url)
            .unwrap_or_default();
        Sculpture {
            title: decode_entities(w.title.as_deref().unwrap_or_default()),
            content: w.content.unwrap_or_default(),
            size: w
                .taille_sculpture
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            featured_image_url,
        }
    }
}

impl From<WireCategory> for Category {
    fn from(w: WireCategory) -> Self {
        Category {
            name: decode_entities(&w.name),
            slug: w.slug,
            sculptures: w
                .sculptures
                .map(|c| c.nodes.into_iter().map(Sculpture::from).collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sculpture(title: &str) -> Sculpture {
        Sculpture {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn sculpture_lookup_is_one_based() {
        let cat = Category {
            name: "Metal works".into(),
            slug: "metal-works".into(),
            sculptures: vec![sculpture("Red Bird"), sculpture("Blue Fish")],
        };
        assert_eq!(cat.sculpture(0), None);
        assert_eq!(cat.sculpture(1).map(|s| s.title.as_str()), Some("Red Bird"));
        assert_eq!(cat.sculpture(3), None);
        assert_eq!(cat.position_of("blue-fish", '-'), Some(2));
        assert_eq!(cat.position_of("green-cat", '-'), None);
    }

    #[test]
    fn wire_sculpture_degrades_missing_fields() {
        let w: WireSculpture = serde_json::from_str(
            r#"{"title":"L&#8217;arbre","featuredImage":null,"taille_sculpture":"  "}"#,
        )
        .unwrap();
        let s = Sculpture::from(w);
        assert_eq!(s.title, "L\u{2019}arbre");
        assert_eq!(s.featured_image_url, "");
        assert_eq!(s.size, None);
    }
}
