//! Session configuration: the global `lang` tag and the skill's own settings map.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

const DEFAULT_LANG: &str = "en-us";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} must contain a JSON object")]
    NotAnObject(PathBuf),
}

/// Locale tag such as `en-us` or `de-de`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lang(String);

impl Lang {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag ("de" for "de-de"), as sent to the translator.
    pub fn primary(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or_default()
    }

    pub fn is_english(&self) -> bool {
        self.primary() == "en"
    }
}

impl Default for Lang {
    fn default() -> Self {
        Self::new(DEFAULT_LANG)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat JSON key-value store, used for both the global configuration and
/// the skill settings file.
#[derive(Debug, Clone, Default)]
pub struct JsonStore(Map<String, Value>);

impl JsonStore {
    /// Reads a store from `path`; `None` yields an empty store.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(map) => {
                debug!(path = %path.display(), keys = map.len(), "config loaded");
                Ok(Self(map))
            }
            _ => Err(ConfigError::NotAnObject(path.to_path_buf())),
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(default)
    }
}

impl From<Map<String, Value>> for JsonStore {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Per-session values, read once when the skill is constructed.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub lang: Lang,
    pub autotranslate: bool,
}

impl SessionConfig {
    /// `lang` comes from the global configuration, `autotranslate` from the
    /// skill settings.
    pub fn from_stores(global: &JsonStore, settings: &JsonStore) -> Self {
        let lang = global.get_str("lang").map(Lang::new).unwrap_or_default();
        let autotranslate = settings.get_bool("autotranslate", true);
        debug!(%lang, autotranslate, "session config");
        Self {
            lang,
            autotranslate,
        }
    }

    /// Applies command-line overrides on top of the stored configuration.
    pub fn with_overrides(mut self, lang: Option<&str>, no_autotranslate: bool) -> Self {
        if let Some(lang) = lang {
            self.lang = Lang::new(lang);
        }
        if no_autotranslate {
            self.autotranslate = false;
        }
        self
    }

    /// Whether queries and answers cross a translation boundary.
    pub fn translates(&self) -> bool {
        self.autotranslate && !self.lang.is_english()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lang: Lang::default(),
            autotranslate: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(value: Value) -> JsonStore {
        match value {
            Value::Object(map) => map.into(),
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn primary_subtag() {
        assert_eq!(Lang::new("de-de").primary(), "de");
        assert_eq!(Lang::new("pt_BR").primary(), "pt");
        assert_eq!(Lang::new("fr").primary(), "fr");
    }

    #[test]
    fn lang_is_normalized() {
        assert_eq!(Lang::new(" EN-US ").as_str(), "en-us");
        assert!(Lang::new("EN-GB").is_english());
    }

    #[test]
    fn defaults_when_keys_are_absent() {
        let session = SessionConfig::from_stores(&JsonStore::default(), &JsonStore::default());
        assert_eq!(session.lang.as_str(), "en-us");
        assert!(session.autotranslate);
        assert!(!session.translates());
    }

    #[test]
    fn reads_lang_and_autotranslate() {
        let session = SessionConfig::from_stores(
            &store(json!({"lang": "de-de", "max_allowed_core_version": 20.2})),
            &store(json!({"autotranslate": false})),
        );
        assert_eq!(session.lang.as_str(), "de-de");
        assert!(!session.autotranslate);
        assert!(!session.translates());
    }

    #[test]
    fn non_english_with_autotranslate_translates() {
        let session = SessionConfig {
            lang: Lang::new("es-es"),
            autotranslate: true,
        };
        assert!(session.translates());
    }

    #[test]
    fn overrides_replace_stored_values() {
        let stored = SessionConfig::from_stores(
            &store(json!({"lang": "de-de"})),
            &store(json!({"autotranslate": true})),
        );
        let session = stored.with_overrides(Some("ES-ES"), true);
        assert_eq!(session.lang.as_str(), "es-es");
        assert!(!session.autotranslate);
    }

    #[test]
    fn absent_overrides_keep_stored_values() {
        let stored = SessionConfig::from_stores(
            &store(json!({"lang": "de-de"})),
            &store(json!({"autotranslate": true})),
        );
        let session = stored.with_overrides(None, false);
        assert_eq!(session.lang.as_str(), "de-de");
        assert!(session.autotranslate);
        assert!(session.translates());
    }

    #[test]
    fn wrongly_typed_setting_falls_back_to_default() {
        let settings = store(json!({"autotranslate": "yes"}));
        assert!(settings.get_bool("autotranslate", true));
    }

    #[test]
    fn load_without_path_is_empty() {
        let store = JsonStore::load(None).unwrap();
        assert_eq!(store.get_str("lang"), None);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = JsonStore::load(Some(Path::new("/nonexistent/ddg-answer.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_reads_bundled_locale_as_object() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("locale/en-us/text.json");
        let store = JsonStore::load(Some(&path)).unwrap();
        assert_eq!(store.get_str("is_verb"), Some(" is "));
    }
}
