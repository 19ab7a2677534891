//! Content locales and page paths.
//!
//! Pages are addressed web-style as `/{locale}/{slug}`, with `/` standing
//! for the default locale's index page. The language toggle rewrites only
//! the locale segment and leaves the rest of the path alone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages a brochure site can carry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Name shown in the footer toggle, in the language itself.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Español",
        }
    }

    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Locale::En => Locale::Es,
            Locale::Es => Locale::En,
        }
    }

    /// Parse a locale code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }

    #[must_use]
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Es]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewrite the locale segment of a page path.
///
/// The path splits on `/` and the second piece is replaced: `en` becomes
/// `es`, and anything else (including `es`, an unknown code, or an empty
/// segment) becomes `en`. The rest of the path is untouched, so `/en/about`
/// maps to `/es/about` and `/es/` maps to `/en/`. Paths with no second
/// segment at all gain one: `""` maps to `/en`.
#[must_use]
pub fn toggle_locale_path(path: &str) -> String {
    let mut parts: Vec<&str> = path.split('/').collect();
    let next = if parts.get(1).copied() == Some(Locale::En.as_str()) {
        Locale::Es
    } else {
        Locale::En
    };
    if parts.len() < 2 {
        parts.push(next.as_str());
    } else {
        parts[1] = next.as_str();
    }
    parts.join("/")
}

/// A resolved page address: locale plus page slug.
///
/// The index page keeps the reserved slug `index` and displays with a
/// trailing slash (`/en/`), matching the site's canonical URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PagePath {
    locale: Locale,
    slug: String,
}

pub const INDEX_SLUG: &str = "index";

impl PagePath {
    #[must_use]
    pub fn new(locale: Locale, slug: impl Into<String>) -> Self {
        Self {
            locale,
            slug: slug.into(),
        }
    }

    #[must_use]
    pub fn index(locale: Locale) -> Self {
        Self::new(locale, INDEX_SLUG)
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn is_index(&self) -> bool {
        self.slug == INDEX_SLUG
    }

    /// Resolve a raw path against a default locale.
    ///
    /// `""` and `/` land on the default locale's index (the root redirect);
    /// `/{locale}` and `/{locale}/` land on that locale's index; deeper
    /// segments name a page slug. Unknown locale codes resolve to `None`.
    #[must_use]
    pub fn resolve(raw: &str, default_locale: Locale) -> Option<Self> {
        let mut segments = raw.split('/').filter(|segment| !segment.is_empty());
        let Some(first) = segments.next() else {
            return Some(Self::index(default_locale));
        };
        let locale = Locale::parse(first)?;
        let path = match segments.next() {
            Some(slug) => Self::new(locale, slug),
            None => Self::index(locale),
        };
        // Anything deeper than /{locale}/{slug} is not a page.
        if segments.next().is_some() {
            return None;
        }
        Some(path)
    }

    /// The path this page would have after a language toggle.
    #[must_use]
    pub fn toggled(&self) -> String {
        toggle_locale_path(&self.to_string())
    }
}

impl fmt::Display for PagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_index() {
            write!(f, "/{}/", self.locale)
        } else {
            write!(f, "/{}/{}", self.locale, self.slug)
        }
    }
}
