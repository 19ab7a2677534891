//! Site bundle loading: a `site.toml` manifest plus localized markdown pages.
//!
//! Layout on disk:
//!
//! ```text
//! mysite/
//!   site.toml
//!   en/index.md  en/about.md  ...
//!   es/index.md  es/about.md  ...
//! ```
//!
//! The same structure can be carried embedded in the binary; both routes
//! meet in [`Site::build`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use brochure_types::{Locale, PagePath};

use crate::page::Page;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no site manifest at {}", path.display())]
    MissingManifest { path: PathBuf },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("page '{slug}' has no {locale} content")]
    MissingPage { slug: String, locale: Locale },
    #[error("manifest declares no pages")]
    NoPages,
}

/// Text with one variant per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<Locale, String>);

impl LocalizedText {
    #[must_use]
    pub fn get(&self, locale: Locale) -> Option<&str> {
        self.0.get(&locale).map(String::as_str)
    }

    /// Variant for `locale`, falling back to any present variant rather
    /// than showing nothing.
    #[must_use]
    pub fn resolve(&self, locale: Locale) -> &str {
        self.get(locale)
            .or_else(|| self.0.values().next().map(String::as_str))
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(pairs: &[(Locale, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(locale, text)| (*locale, (*text).to_string()))
                .collect(),
        )
    }
}

/// `site.toml` as written by the site author.
#[derive(Debug, Deserialize)]
pub struct SiteManifest {
    pub site: SiteInfo,
    #[serde(default)]
    pub pages: Vec<PageEntry>,
    pub notice: Option<NoticeContent>,
}

#[derive(Debug, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: Option<LocalizedText>,
    #[serde(default)]
    pub default_locale: Locale,
    #[serde(default = "all_locales")]
    pub locales: Vec<Locale>,
}

fn all_locales() -> Vec<Locale> {
    Locale::all().to_vec()
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    pub slug: String,
    pub title: LocalizedText,
}

/// Content of the dismissable notice overlay shown on startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoticeContent {
    pub title: LocalizedText,
    pub body: LocalizedText,
}

/// One page across all of its locales.
#[derive(Debug)]
struct SitePage {
    slug: String,
    title: LocalizedText,
    content: BTreeMap<Locale, Page>,
}

/// A fully loaded site: manifest metadata plus parsed pages.
#[derive(Debug)]
pub struct Site {
    name: String,
    tagline: Option<LocalizedText>,
    default_locale: Locale,
    locales: Vec<Locale>,
    pages: Vec<SitePage>,
    notice: Option<NoticeContent>,
    /// Directory the site was loaded from; `None` for the embedded site.
    root: Option<PathBuf>,
}

impl Site {
    /// Load a site bundle from a directory.
    pub fn load_dir(root: &Path) -> Result<Self, SiteError> {
        let manifest_path = root.join("site.toml");
        if !manifest_path.exists() {
            return Err(SiteError::MissingManifest {
                path: manifest_path,
            });
        }
        let raw = fs::read_to_string(&manifest_path).map_err(|source| SiteError::Read {
            path: manifest_path.clone(),
            source,
        })?;
        let manifest: SiteManifest =
            toml::from_str(&raw).map_err(|source| SiteError::Parse {
                path: manifest_path,
                source,
            })?;

        let mut site = Self::build(manifest, |locale, slug| {
            let path = root.join(locale.as_str()).join(format!("{slug}.md"));
            fs::read_to_string(&path).map_err(|source| SiteError::Read { path, source })
        })?;
        site.root = Some(root.to_path_buf());
        Ok(site)
    }

    /// Build a site from in-memory sources, keyed `"{locale}/{slug}.md"`.
    /// Backs the embedded demo site.
    pub fn from_files(manifest: &str, files: &[(&str, &str)]) -> Result<Self, SiteError> {
        let manifest: SiteManifest =
            toml::from_str(manifest).map_err(|source| SiteError::Parse {
                path: PathBuf::from("site.toml"),
                source,
            })?;
        Self::build(manifest, |locale, slug| {
            let key = format!("{}/{slug}.md", locale.as_str());
            files
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, content)| (*content).to_string())
                .ok_or_else(|| SiteError::MissingPage {
                    slug: slug.to_string(),
                    locale,
                })
        })
    }

    fn build(
        manifest: SiteManifest,
        mut read_page: impl FnMut(Locale, &str) -> Result<String, SiteError>,
    ) -> Result<Self, SiteError> {
        if manifest.pages.is_empty() {
            return Err(SiteError::NoPages);
        }

        let mut locales = manifest.site.locales;
        if locales.is_empty() {
            locales = all_locales();
        }
        if !locales.contains(&manifest.site.default_locale) {
            tracing::warn!(
                default = %manifest.site.default_locale,
                "default locale missing from locale list; adding it"
            );
            locales.insert(0, manifest.site.default_locale);
        }

        let mut pages = Vec::with_capacity(manifest.pages.len());
        for entry in manifest.pages {
            let mut content = BTreeMap::new();
            for locale in &locales {
                let source = read_page(*locale, &entry.slug)?;
                let lead_id = brochure_types::SectionId::new(entry.slug.clone());
                content.insert(*locale, Page::parse(lead_id, &source));
            }
            pages.push(SitePage {
                slug: entry.slug,
                title: entry.title,
                content,
            });
        }

        Ok(Self {
            name: manifest.site.name,
            tagline: manifest.site.tagline,
            default_locale: manifest.site.default_locale,
            locales,
            pages,
            notice: manifest.notice,
            root: None,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tagline(&self, locale: Locale) -> Option<&str> {
        self.tagline.as_ref().map(|text| text.resolve(locale))
    }

    #[must_use]
    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    #[must_use]
    pub fn notice(&self) -> Option<&NoticeContent> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Page slugs in manifest order (drives tabs and page cycling).
    #[must_use]
    pub fn page_slugs(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.slug.as_str()).collect()
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Position of a slug in manifest order.
    #[must_use]
    pub fn page_position(&self, slug: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.slug == slug)
    }

    /// Localized title for a page slug.
    #[must_use]
    pub fn page_title(&self, slug: &str, locale: Locale) -> Option<&str> {
        self.pages
            .iter()
            .find(|page| page.slug == slug)
            .map(|page| page.title.resolve(locale))
    }

    /// Parsed content for a page address, if the site has it.
    #[must_use]
    pub fn page(&self, path: &PagePath) -> Option<&Page> {
        self.pages
            .iter()
            .find(|page| page.slug == path.slug())?
            .content
            .get(&path.locale())
    }

    /// Whether `path` names a real page in a declared locale.
    #[must_use]
    pub fn has_page(&self, path: &PagePath) -> bool {
        self.page(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalizedText, Site, SiteError};
    use brochure_types::{Locale, PagePath};

    const MANIFEST: &str = r#"
[site]
name = "Test Site"
default_locale = "en"
locales = ["en", "es"]

[[pages]]
slug = "index"
title = { en = "Home", es = "Inicio" }

[[pages]]
slug = "about"
title = { en = "About", es = "Acerca" }

[notice]
title = { en = "Thanks!", es = "¡Gracias!" }
body = { en = "Message received.", es = "Mensaje recibido." }
"#;

    fn demo_files() -> Vec<(&'static str, &'static str)> {
        vec![
            ("en/index.md", "Welcome.\n\n## Highlights\n\nStuff.\n"),
            ("es/index.md", "Bienvenido.\n\n## Destacados\n\nCosas.\n"),
            ("en/about.md", "## Bio\n\nText.\n"),
            ("es/about.md", "## Biografía\n\nTexto.\n"),
        ]
    }

    #[test]
    fn builds_from_in_memory_files() {
        let site = Site::from_files(MANIFEST, &demo_files()).unwrap();
        assert_eq!(site.name(), "Test Site");
        assert_eq!(site.default_locale(), Locale::En);
        assert_eq!(site.page_slugs(), ["index", "about"]);
        assert!(site.root().is_none());

        let page = site.page(&PagePath::index(Locale::Es)).unwrap();
        assert_eq!(page.sections()[1].id().as_str(), "destacados");
    }

    #[test]
    fn localized_titles_resolve_per_locale() {
        let site = Site::from_files(MANIFEST, &demo_files()).unwrap();
        assert_eq!(site.page_title("index", Locale::Es), Some("Inicio"));
        assert_eq!(site.page_title("about", Locale::En), Some("About"));
        assert_eq!(site.page_title("missing", Locale::En), None);
    }

    #[test]
    fn notice_carries_both_locales() {
        let site = Site::from_files(MANIFEST, &demo_files()).unwrap();
        let notice = site.notice().unwrap();
        assert_eq!(notice.title.resolve(Locale::Es), "¡Gracias!");
        assert_eq!(notice.body.resolve(Locale::En), "Message received.");
    }

    #[test]
    fn missing_page_file_is_an_error() {
        let files = vec![("en/index.md", "hi"), ("es/index.md", "hola")];
        let manifest = r#"
[site]
name = "S"

[[pages]]
slug = "index"
title = { en = "Home" }

[[pages]]
slug = "about"
title = { en = "About" }
"#;
        let err = Site::from_files(manifest, &files).unwrap_err();
        assert!(matches!(err, SiteError::MissingPage { .. }));
    }

    #[test]
    fn empty_page_list_is_rejected() {
        let manifest = "[site]\nname = \"S\"\n";
        let err = Site::from_files(manifest, &[]).unwrap_err();
        assert!(matches!(err, SiteError::NoPages));
    }

    #[test]
    fn bad_manifest_toml_is_a_parse_error() {
        let err = Site::from_files("not toml at all = [", &[]).unwrap_err();
        assert!(matches!(err, SiteError::Parse { .. }));
    }

    #[test]
    fn load_dir_round_trips_through_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("site.toml"), MANIFEST).unwrap();
        for (name, content) in demo_files() {
            let path = dir.path().join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }

        let site = Site::load_dir(dir.path()).unwrap();
        assert_eq!(site.root(), Some(dir.path()));
        assert!(site.has_page(&PagePath::new(Locale::En, "about")));
        assert!(!site.has_page(&PagePath::new(Locale::En, "missing")));
    }

    #[test]
    fn load_dir_without_manifest_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let err = Site::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, SiteError::MissingManifest { .. }));
    }

    #[test]
    fn localized_text_falls_back_to_any_variant() {
        let text = LocalizedText::from_pairs(&[(Locale::Es, "hola")]);
        assert_eq!(text.get(Locale::En), None);
        assert_eq!(text.resolve(Locale::En), "hola");
        assert_eq!(LocalizedText::default().resolve(Locale::En), "");
    }
}
