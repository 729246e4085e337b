use folio::catalog::{Catalog, Section};
use folio::controller::GalleryController;
use folio::error::FolioError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CATALOG: &str = r#"{
    "gallery": [
        {"id": 1, "title": "Local", "images": ["/photos/a.png", "photos/missing.png"], "category": "Travel"},
        {"id": 2, "title": "Remote", "image": "https://example.com/b.jpg", "category": "Food"}
    ],
    "projects": [
        {"id": "flex", "title": "Flex", "image": "/flex.png", "github": "https://github.com/example/flex"}
    ]
}"#;

fn write_catalog(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("catalog.json");
    fs::write(&path, json).unwrap();
    path
}

fn write_png(path: PathBuf) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::new(4, 3).save(&path).unwrap();
}

#[test]
fn test_load_sets_base_dir_and_normalizes_items() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, CATALOG);

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.base_dir.as_deref(), Some(dir.path()));
    assert_eq!(catalog.section(Section::Gallery).len(), 2);
    assert_eq!(catalog.projects[0].images, vec!["/flex.png".to_string()]);
    assert_eq!(
        catalog.projects[0].links.github.as_deref(),
        Some("https://github.com/example/flex")
    );
}

#[test]
fn test_verify_reports_only_broken_local_images() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, CATALOG);
    write_png(dir.path().join("photos/a.png"));
    fs::write(dir.path().join("flex.png"), b"not an image").unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let mut issues: Vec<String> = catalog
        .verify_local_images()
        .into_iter()
        .map(|issue| issue.reference)
        .collect();
    issues.sort();
    assert_eq!(issues, vec!["/flex.png", "photos/missing.png"]);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, FolioError::Io { .. }));
}

#[test]
fn test_malformed_json_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, r#"{"gallery": [{"id": 1}]}"#);
    assert!(matches!(Catalog::load(&path), Err(FolioError::Json(_))));
}

#[test]
fn test_explicit_path_wins_over_builtin() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, CATALOG);
    let catalog = Catalog::load_or_builtin(Some(&path)).unwrap();
    assert_eq!(catalog.gallery.len(), 2);
}

#[test]
fn test_saved_catalog_loads_back_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config").join("folio").join("catalog.json");
    let builtin = Catalog::builtin().unwrap();

    builtin.save(&path).unwrap();
    let reloaded = Catalog::load(&path).unwrap();
    assert_eq!(reloaded.profile, builtin.profile);
    assert_eq!(reloaded.gallery, builtin.gallery);
    assert_eq!(reloaded.projects, builtin.projects);
    assert_eq!(reloaded.base_dir.as_deref(), path.parent());
}

#[test]
fn test_saved_links_and_single_images_survive() {
    let dir = TempDir::new().unwrap();
    let source = Catalog::load(&write_catalog(&dir, CATALOG)).unwrap();
    let path = dir.path().join("copy.json");

    source.save(&path).unwrap();
    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"links\""));
    assert!(!json.contains("\"featured\""));

    let reloaded = Catalog::load(&path).unwrap();
    assert_eq!(reloaded.projects, source.projects);
    assert_eq!(reloaded.gallery[1].images, vec!["https://example.com/b.jpg"]);
}

#[test]
fn test_builtin_catalog_drives_a_controller() {
    let catalog = Catalog::builtin().unwrap();
    let mut controller = GalleryController::new(catalog.gallery.clone());
    assert_eq!(controller.total_pages(), 2);

    let labels: Vec<String> = controller
        .categories()
        .iter()
        .map(|c| c.label().to_string())
        .collect();
    assert_eq!(labels, vec!["All", "UI/UX", "Web Development", "Animation"]);

    controller.set_category("UI/UX");
    assert_eq!(controller.filtered_len(), 2);
    assert_eq!(controller.total_pages(), 1);
}
