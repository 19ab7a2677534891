//! Loading site bundles from disk: happy path and the error taxonomy.

use brochure_engine::{Site, SiteError};
use brochure_types::{Locale, PagePath};
use tempfile::tempdir;

use crate::common;

#[test]
fn loads_a_directory_site() {
    let dir = tempdir().unwrap();
    common::write_site(dir.path());

    let site = Site::load_dir(dir.path()).unwrap();
    assert_eq!(site.name(), "Casa Azul");
    assert_eq!(site.page_count(), 3);
    assert_eq!(site.default_locale(), Locale::En);
    assert_eq!(site.root(), Some(dir.path()));
    assert!(site.notice().is_none());
    assert_eq!(site.tagline(Locale::Es), Some("Estudio de diseño"));
}

#[test]
fn pages_parse_into_sections_per_locale() {
    let dir = tempdir().unwrap();
    common::write_site(dir.path());
    let site = Site::load_dir(dir.path()).unwrap();

    let en = site.page(&PagePath::index(Locale::En)).unwrap();
    let ids: Vec<&str> = en.sections().iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, ["index", "work", "contact"]);

    let es = site.page(&PagePath::index(Locale::Es)).unwrap();
    let ids: Vec<&str> = es.sections().iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, ["index", "trabajo", "contacto"]);
}

#[test]
fn missing_manifest_is_reported() {
    let dir = tempdir().unwrap();
    let err = Site::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, SiteError::MissingManifest { .. }));
}

#[test]
fn malformed_manifest_is_reported() {
    let dir = tempdir().unwrap();
    common::write_file(dir.path(), "site.toml", "[site\nname = ");
    let err = Site::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, SiteError::Parse { .. }));
}

#[test]
fn missing_page_file_fails_the_load() {
    let dir = tempdir().unwrap();
    common::write_site(dir.path());
    std::fs::remove_file(dir.path().join("es").join("about.md")).unwrap();

    let err = Site::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, SiteError::Read { .. }));
}

#[test]
fn manifest_without_pages_is_rejected() {
    let dir = tempdir().unwrap();
    common::write_file(
        dir.path(),
        "site.toml",
        "[site]\nname = \"Empty\"\ndefault_locale = \"en\"\nlocales = [\"en\"]\n",
    );
    let err = Site::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, SiteError::NoPages));
}
