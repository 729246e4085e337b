//! Content model shared by the gallery and the project showcase.
//!
//! Catalog records come in two shapes: a single `image` field or an `images`
//! list. Both are folded into [`BrowsableItem::images`] while decoding, so the
//! rest of the crate only ever sees a non-empty ordered image list.

use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an item, authored alongside the content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n)
    }
}

impl From<i32> for ItemId {
    fn from(n: i32) -> Self {
        ItemId::Number(i64::from(n))
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

/// External links attached to a project card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,
}

impl Links {
    pub fn is_empty(&self) -> bool {
        self.github.is_none() && self.live.is_none()
    }
}

/// A gallery entry or a portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawItem")]
pub struct BrowsableItem {
    pub id: ItemId,
    pub title: String,
    /// Never empty; index 0 is the cover image.
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
}

impl BrowsableItem {
    /// Build an item from its required fields.
    ///
    /// Fails with [`FolioError::EmptyImages`] when `images` is empty.
    pub fn new<I, S>(id: impl Into<ItemId>, title: impl Into<String>, images: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        let images: Vec<String> = images.into_iter().map(Into::into).collect();
        if images.is_empty() {
            return Err(FolioError::EmptyImages { id: id.to_string() });
        }
        Ok(Self {
            id,
            title: title.into(),
            images,
            category: None,
            description: None,
            date: None,
            tags: Vec::new(),
            links: Links::default(),
            featured: false,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn cover(&self) -> &str {
        // `images` is non-empty by construction
        &self.images[0]
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Description and date joined the way cards display them.
    pub fn caption(&self) -> Option<String> {
        match (&self.description, &self.date) {
            (Some(d), Some(date)) => Some(format!("{} ({})", d, date)),
            (Some(d), None) => Some(d.clone()),
            (None, Some(date)) => Some(date.clone()),
            (None, None) => None,
        }
    }
}

/// Wire shape of a catalog record before normalization.
#[derive(Debug, Deserialize)]
struct RawItem {
    id: ItemId,
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    images: Option<Vec<String>>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    github: Option<String>,
    #[serde(default)]
    live: Option<String>,
    #[serde(default)]
    links: Option<Links>,
    #[serde(default)]
    featured: bool,
}

impl TryFrom<RawItem> for BrowsableItem {
    type Error = FolioError;

    fn try_from(raw: RawItem) -> Result<Self> {
        let images = match (raw.image, raw.images) {
            (None, None) => return Err(FolioError::MissingImages { title: raw.title }),
            (Some(single), None) => vec![single],
            (None, Some(list)) => list,
            (Some(single), Some(mut list)) => {
                if !list.contains(&single) {
                    list.insert(0, single);
                }
                list
            }
        };

        let mut links = raw.links.unwrap_or_default();
        if links.github.is_none() {
            links.github = raw.github;
        }
        if links.live.is_none() {
            links.live = raw.live;
        }

        let mut item = BrowsableItem::new(raw.id, raw.title, images)?;
        item.category = raw.category;
        item.description = raw.description;
        item.date = raw.date;
        item.tags = raw.tags;
        item.links = links;
        item.featured = raw.featured;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_image_record_becomes_one_element_list() {
        let item: BrowsableItem =
            serde_json::from_str(r#"{"id": 1, "title": "Flex", "image": "/flex.png"}"#).unwrap();
        assert_eq!(item.images, vec!["/flex.png".to_string()]);
        assert_eq!(item.cover(), "/flex.png");
    }

    #[test]
    fn test_image_and_images_are_merged_with_image_first() {
        let item: BrowsableItem = serde_json::from_str(
            r#"{"id": "x", "title": "T", "image": "a.png", "images": ["b.png", "c.png"]}"#,
        )
        .unwrap();
        assert_eq!(item.images, vec!["a.png", "b.png", "c.png"]);

        let dup: BrowsableItem = serde_json::from_str(
            r#"{"id": "y", "title": "T", "image": "b.png", "images": ["a.png", "b.png"]}"#,
        )
        .unwrap();
        assert_eq!(dup.images, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_record_without_images_is_rejected() {
        let err = serde_json::from_str::<BrowsableItem>(r#"{"id": 1, "title": "Nothing"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Nothing"));
    }

    #[test]
    fn test_empty_images_is_rejected() {
        assert!(serde_json::from_str::<BrowsableItem>(r#"{"id": 1, "title": "T", "images": []}"#)
            .is_err());
        assert!(BrowsableItem::new(3, "T", Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_flat_links_are_collected() {
        let item: BrowsableItem = serde_json::from_str(
            r#"{"id": 2, "title": "P", "image": "p.png", "github": "https://github.com/x", "featured": true}"#,
        )
        .unwrap();
        assert_eq!(item.links.github.as_deref(), Some("https://github.com/x"));
        assert!(item.links.live.is_none());
        assert!(item.featured);
    }

    #[test]
    fn test_string_and_numeric_ids() {
        assert_eq!(ItemId::from(7).to_string(), "7");
        assert_eq!(ItemId::from("hike").to_string(), "hike");
        let item: BrowsableItem =
            serde_json::from_str(r#"{"id": "hike", "title": "H", "image": "h.jpg"}"#).unwrap();
        assert_eq!(item.id, ItemId::Text("hike".into()));
    }

    #[test]
    fn test_caption() {
        let item = BrowsableItem::new(1, "T", ["a"])
            .unwrap()
            .with_description("Weekend trip")
            .with_date("June 2025");
        assert_eq!(item.caption().as_deref(), Some("Weekend trip (June 2025)"));
        assert_eq!(BrowsableItem::new(2, "T", ["a"]).unwrap().caption(), None);
    }
}
