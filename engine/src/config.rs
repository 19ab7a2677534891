//! User configuration at `~/.brochure/config.toml`.
//!
//! ```toml
//! [app]
//! locale = "es"
//! site_dir = "~/sites/portfolio"
//! ascii_only = false
//! high_contrast = false
//! reduced_motion = false
//! watch = true
//! ```

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use brochure_types::Locale;
use brochure_types::ui::UiOptions;

// Default value function for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct BrochureConfig {
    pub app: Option<AppConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Startup locale when no previous session is restored.
    pub locale: Option<String>,
    /// Site to open when the command line names none.
    pub site_dir: Option<String>,
    /// Use ASCII-only glyphs for icons and rails.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable panel/modal animations and motion effects.
    #[serde(default)]
    pub reduced_motion: bool,
    /// Watch the site directory and reload edited pages.
    #[serde(default = "default_true")]
    pub watch: bool,
}

impl BrochureConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path (`None` when the file does not exist).
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// UI options this config asks for.
    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let app = self.app.as_ref();
        UiOptions {
            ascii_only: app.is_some_and(|app| app.ascii_only),
            high_contrast: app.is_some_and(|app| app.high_contrast),
            reduced_motion: app.is_some_and(|app| app.reduced_motion),
        }
    }

    /// Startup locale, if configured and valid.
    #[must_use]
    pub fn preferred_locale(&self) -> Option<Locale> {
        let raw = self.app.as_ref()?.locale.as_deref()?;
        let parsed = Locale::parse(raw);
        if parsed.is_none() {
            tracing::warn!("Unknown locale in config: {}", raw);
        }
        parsed
    }

    /// Configured fallback site directory, with `~` and `${VAR}` expanded.
    #[must_use]
    pub fn site_dir(&self) -> Option<PathBuf> {
        let raw = self.app.as_ref()?.site_dir.as_deref()?;
        let expanded = expand_env_vars(raw);
        let expanded = expanded.trim();
        if expanded.is_empty() {
            return None;
        }
        if let Some(rest) = expanded.strip_prefix("~/") {
            return dirs::home_dir().map(|home| home.join(rest));
        }
        Some(PathBuf::from(expanded))
    }

    #[must_use]
    pub fn watch_enabled(&self) -> bool {
        self.app.as_ref().is_none_or(|app| app.watch)
    }

    /// Persist the active locale to the config file.
    ///
    /// Uses `toml_edit` to preserve comments and formatting.
    /// Creates the config file and parent directory if they don't exist.
    pub fn persist_locale(locale: Locale) -> std::io::Result<()> {
        let path = match config_path() {
            Some(path) => path,
            None => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine config path",
                ));
            }
        };
        Self::persist_locale_at(&path, locale)
    }

    fn persist_locale_at(path: &Path, locale: Locale) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = if path.exists() {
            fs::read_to_string(path)?
        } else {
            String::new()
        };

        let mut doc = content
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if !doc.contains_key("app") {
            doc["app"] = toml_edit::Item::Table(toml_edit::Table::new());
        }
        doc["app"]["locale"] = toml_edit::value(locale.as_str());

        crate::session::atomic_write(path, doc.to_string().as_bytes())
    }
}

/// Expand `${VAR}` references against the environment. Unknown variables
/// become empty; unclosed braces pass through untouched.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut i = 0;

    while i < value.len() {
        if value[i..].starts_with("${") {
            let start = i + 2;
            if let Some(end_rel) = value[start..].find('}') {
                let end = start + end_rel;
                let var = &value[start..end];
                if !var.is_empty() {
                    let replacement = env::var(var).unwrap_or_default();
                    out.push_str(&replacement);
                }
                i = end + 1;
                continue;
            }
        }

        let ch = value[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".brochure").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brochure_types::Locale;

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("hello world"), "hello world");
    }

    #[test]
    fn expand_env_vars_single_var() {
        unsafe {
            std::env::set_var("BROCHURE_TEST_VAR", "replaced");
        }
        assert_eq!(
            expand_env_vars("prefix ${BROCHURE_TEST_VAR} suffix"),
            "prefix replaced suffix"
        );
        unsafe {
            std::env::remove_var("BROCHURE_TEST_VAR");
        }
    }

    #[test]
    fn expand_env_vars_missing_var_becomes_empty() {
        assert_eq!(expand_env_vars("a${BROCHURE_NO_SUCH_VAR}b"), "ab");
    }

    #[test]
    fn expand_env_vars_unclosed_brace_preserved() {
        assert_eq!(expand_env_vars("a${unclosed"), "a${unclosed");
    }

    #[test]
    fn expand_env_vars_empty_var_name_preserved() {
        assert_eq!(expand_env_vars("a${}b"), "ab");
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let loaded = BrochureConfig::load_from(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn full_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[app]\nlocale = \"es\"\nhigh_contrast = true\nwatch = false\n",
        )
        .unwrap();

        let config = BrochureConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.preferred_locale(), Some(Locale::Es));
        assert!(config.ui_options().high_contrast);
        assert!(!config.ui_options().ascii_only);
        assert!(!config.watch_enabled());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[app\nlocale=").unwrap();
        let err = BrochureConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn unknown_locale_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[app]\nlocale = \"fr\"\n").unwrap();
        let config = BrochureConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.preferred_locale(), None);
    }

    #[test]
    fn defaults_without_app_table() {
        let config = BrochureConfig::default();
        assert_eq!(config.preferred_locale(), None);
        assert!(config.watch_enabled());
        assert_eq!(config.ui_options(), brochure_types::ui::UiOptions::default());
    }

    #[test]
    fn persist_locale_preserves_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "# my config\n[app]\nlocale = \"en\"\nhigh_contrast = true\n",
        )
        .unwrap();

        BrochureConfig::persist_locale_at(&path, Locale::Es).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# my config"));
        assert!(content.contains("locale = \"es\""));
        assert!(content.contains("high_contrast = true"));
    }

    #[test]
    fn persist_locale_creates_file_and_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        BrochureConfig::persist_locale_at(&path, Locale::En).unwrap();

        let config = BrochureConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.preferred_locale(), Some(Locale::En));
    }

    #[test]
    fn site_dir_expands_home_prefix() {
        let config: BrochureConfig =
            toml::from_str("[app]\nsite_dir = \"~/sites/demo\"\n").unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.site_dir(), Some(home.join("sites/demo")));
        }
    }

    #[test]
    fn empty_site_dir_is_none() {
        let config: BrochureConfig = toml::from_str("[app]\nsite_dir = \"\"\n").unwrap();
        assert_eq!(config.site_dir(), None);
    }
}
