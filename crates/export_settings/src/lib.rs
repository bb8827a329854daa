// crates/export_settings/src/lib.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// String values the host uses for an enabled checkbox or switch.
const TRUTHY_TOKENS: [&str; 3] = ["true", "enabled", "on"];

/// Returns `true` if `value` is one of the truthy tokens, ignoring ASCII case.
pub fn is_truthy(value: &str) -> bool {
    TRUTHY_TOKENS
        .iter()
        .any(|token| value.eq_ignore_ascii_case(token))
}

/// Export settings as handed over by the host in its export info file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExportSettings {
    #[serde(default)]
    document_arguments: HashMap<String, String>,
}

impl ExportSettings {
    /// Parses the export info JSON. Fields other than `document_arguments`
    /// are ignored.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Export info is not valid JSON")
    }

    /// Reads and parses the export info file at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not hold a JSON object with a
    /// string-to-string `document_arguments` mapping.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read export info {}", path.display()))?;
        let settings = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse export info {}", path.display()))?;
        debug!(
            count = settings.document_arguments.len(),
            "loaded document arguments"
        );
        Ok(settings)
    }

    /// Builds settings from explicit label/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            document_arguments: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Looks up a setting by its exact label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.document_arguments.get(label).map(String::as_str)
    }

    /// Whether the setting is present and holds a truthy token.
    pub fn is_enabled(&self, label: &str) -> bool {
        self.get(label).map_or(false, is_truthy)
    }
}
