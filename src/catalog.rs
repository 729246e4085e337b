//! Static content source for the gallery and project views.
//!
//! A catalog is a JSON document with `gallery` and `projects` item lists and
//! an optional `profile`. One is compiled into the crate; others can be
//! loaded from disk. Loaded catalogs are validated before use and never
//! mutated afterwards.

use crate::error::{FolioError, Result};
use crate::item::{BrowsableItem, ItemId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Which item list of the catalog a view browses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Gallery,
    Projects,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Gallery, Section::Projects];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Gallery => "gallery",
            Section::Projects => "projects",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Section {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gallery" => Ok(Section::Gallery),
            "projects" | "project" => Ok(Section::Projects),
            other => Err(FolioError::Validation(format!(
                "unknown section '{}', expected 'gallery' or 'projects'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub period: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// Biography shown on the landing and about pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

/// A local image reference that could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageIssue {
    pub section: Section,
    pub id: ItemId,
    pub reference: String,
    pub reason: String,
}

impl fmt::Display for ImageIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} #{}: {} ({})",
            self.section, self.id, self.reference, self.reason
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub gallery: Vec<BrowsableItem>,
    #[serde(default)]
    pub projects: Vec<BrowsableItem>,
    /// Directory that relative and root-relative image paths resolve against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Catalog {
    /// Parse and validate a catalog document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Read a catalog file. Image paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| FolioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog = Self::from_json_str(&json)?;
        catalog.base_dir = path.parent().map(Path::to_path_buf);
        log::info!(
            "loaded catalog {} ({} gallery items, {} projects)",
            path.display(),
            catalog.gallery.len(),
            catalog.projects.len()
        );
        Ok(catalog)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the catalog as pretty JSON, creating missing parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        let io_err = |source| FolioError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, json).map_err(io_err)?;
        log::info!("wrote catalog {}", path.display());
        Ok(())
    }

    /// `<config dir>/folio/catalog.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio").join("catalog.json"))
    }

    /// Load `path` if given, otherwise the default catalog file if it
    /// exists, otherwise the built-in catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.is_file() => Self::load(&default),
            _ => {
                log::debug!("no catalog file found, using the built-in catalog");
                Self::builtin()
            }
        }
    }

    pub fn section(&self, section: Section) -> &[BrowsableItem] {
        match section {
            Section::Gallery => &self.gallery,
            Section::Projects => &self.projects,
        }
    }

    /// Reject duplicate ids within a section.
    pub fn validate(&self) -> Result<()> {
        for section in Section::ALL {
            let mut seen = HashSet::new();
            for item in self.section(section) {
                if !seen.insert(&item.id) {
                    return Err(FolioError::DuplicateId {
                        section: section.to_string(),
                        id: item.id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Filesystem location of an image reference, or `None` for remote URLs.
    ///
    /// Root-relative references (`/flex.png`) resolve against the catalog
    /// directory, the way a static site serves its public folder.
    pub fn resolve_image(&self, reference: &str) -> Option<PathBuf> {
        if is_remote(reference) {
            return None;
        }
        let relative = reference.trim_start_matches('/');
        let base = self.base_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        Some(base.join(relative))
    }

    /// Check every local image reference in parallel. Remote URLs are
    /// skipped.
    pub fn verify_local_images(&self) -> Vec<ImageIssue> {
        let refs: Vec<(Section, &BrowsableItem, &str)> = Section::ALL
            .iter()
            .flat_map(move |&section| {
                self.section(section).iter().flat_map(move |item| {
                    item.images
                        .iter()
                        .map(move |reference| (section, item, reference.as_str()))
                })
            })
            .filter(|(_, _, reference)| !is_remote(reference))
            .collect();

        log::debug!("verifying {} local image references", refs.len());

        refs.par_iter()
            .filter_map(|&(section, item, reference)| {
                let path = self.resolve_image(reference)?;
                let reason = match image::image_dimensions(&path) {
                    Ok(_) => return None,
                    Err(image::ImageError::IoError(e)) => e.to_string(),
                    Err(e) => format!("not a readable image: {}", e),
                };
                Some(ImageIssue {
                    section,
                    id: item.id.clone(),
                    reference: reference.to_string(),
                    reason,
                })
            })
            .collect()
    }
}

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.gallery.len(), 8);
        assert_eq!(catalog.projects.len(), 6);
        assert!(catalog.profile.is_some());
        assert!(catalog.projects.iter().all(|p| p.images.len() == 1));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"{"gallery": [
            {"id": 1, "title": "A", "image": "a.jpg"},
            {"id": 1, "title": "B", "image": "b.jpg"}
        ]}"#;
        match Catalog::from_json_str(json) {
            Err(FolioError::DuplicateId { section, id }) => {
                assert_eq!(section, "gallery");
                assert_eq!(id, "1");
            }
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_same_id_in_different_sections_is_fine() {
        let json = r#"{
            "gallery": [{"id": 1, "title": "A", "image": "a.jpg"}],
            "projects": [{"id": 1, "title": "B", "image": "b.jpg"}]
        }"#;
        assert!(Catalog::from_json_str(json).is_ok());
    }

    #[test]
    fn test_resolve_image() {
        let mut catalog = Catalog::from_json_str("{}").unwrap();
        catalog.base_dir = Some(PathBuf::from("/srv/site"));
        assert_eq!(catalog.resolve_image("https://example.com/a.jpg"), None);
        assert_eq!(
            catalog.resolve_image("/flex.png"),
            Some(PathBuf::from("/srv/site/flex.png"))
        );
        assert_eq!(
            catalog.resolve_image("img/a.png"),
            Some(PathBuf::from("/srv/site/img/a.png"))
        );
    }

    #[test]
    fn test_section_parsing() {
        assert_eq!("Gallery".parse::<Section>().unwrap(), Section::Gallery);
        assert_eq!("project".parse::<Section>().unwrap(), Section::Projects);
        assert!("skills".parse::<Section>().is_err());
    }
}
