//! Built-in demo site, embedded so the binary runs with no files at all.

use brochure_engine::{Site, SiteError};

const MANIFEST: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/site.toml"));

const PAGES: &[(&str, &str)] = &[
    (
        "en/index.md",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/en/index.md")),
    ),
    (
        "es/index.md",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/es/index.md")),
    ),
    (
        "en/about.md",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/en/about.md")),
    ),
    (
        "es/about.md",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/es/about.md")),
    ),
    (
        "en/projects.md",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/en/projects.md")),
    ),
    (
        "es/projects.md",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/es/projects.md")),
    ),
    (
        "en/education.md",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/en/education.md")),
    ),
    (
        "es/education.md",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/es/education.md")),
    ),
];

/// Parse the embedded demo site.
///
/// Errors here mean the shipped assets are malformed, which is a build
/// defect, so the caller surfaces them rather than recovering.
pub fn embedded_site() -> Result<Site, SiteError> {
    Site::from_files(MANIFEST, PAGES)
}
