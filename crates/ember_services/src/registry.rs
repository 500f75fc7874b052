//! Configuration registry
//!
//! Key/value string lookups under two distinct roots, mirroring the split the
//! original installers used (the base game and the engine each keep their own
//! tree). Backed by JSON documents of `section -> key -> value`; consumers
//! only ever see plain strings.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Which configuration tree to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryRoot {
    /// Engine-owned settings.
    Engine,
    /// Game-owned settings.
    Game,
}

impl RegistryRoot {
    pub fn name(self) -> &'static str {
        match self {
            RegistryRoot::Engine => "engine",
            RegistryRoot::Game => "game",
        }
    }
}

/// Errors opening a registry document. Lookups never fail; a missing key is
/// just `None`.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse registry file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
struct Sections(HashMap<String, HashMap<String, String>>);

/// String registry for one root.
#[derive(Debug, Clone)]
pub struct Registry {
    root: RegistryRoot,
    sections: Sections,
}

impl Registry {
    /// Open the registry document for `root` at `path`.
    pub fn open(root: RegistryRoot, path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path)?;
        let registry = Self::from_json(root, &text)?;
        tracing::debug!(root = root.name(), path = %path.display(), "registry loaded");
        Ok(registry)
    }

    /// Parse a registry document from JSON text.
    pub fn from_json(root: RegistryRoot, text: &str) -> Result<Self, RegistryError> {
        Ok(Self {
            root,
            sections: serde_json::from_str(text)?,
        })
    }

    /// An empty registry; every lookup answers `None`.
    pub fn empty(root: RegistryRoot) -> Self {
        Self {
            root,
            sections: Sections::default(),
        }
    }

    #[inline]
    pub fn root(&self) -> RegistryRoot {
        self.root
    }

    /// Look up a string value under `section`/`key`.
    pub fn string_value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .0
            .get(section)
            .and_then(|kv| kv.get(key))
            .map(String::as_str)
    }
}

/// System language as a lowercase word, defaulting to `"english"`.
///
/// Derived from `LC_ALL`/`LANG`; unknown or unset locales fall back to the
/// default rather than erroring, matching the degrade-gracefully policy of
/// everything at this layer.
pub fn system_language() -> String {
    let locale = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default();
    language_from_locale(&locale).to_string()
}

/// Map a locale string like `de_DE.UTF-8` to a language word.
pub fn language_from_locale(locale: &str) -> &'static str {
    let code = locale
        .split(['_', '.', '@'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match code.as_str() {
        "de" => "german",
        "fr" => "french",
        "es" => "spanish",
        "it" => "italian",
        "pl" => "polish",
        "pt" => "portuguese",
        "ko" => "korean",
        "ja" => "japanese",
        "zh" => "chinese",
        _ => "english",
    }
}
