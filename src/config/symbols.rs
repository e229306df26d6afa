use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Flat mapping from dotted state names (`playing`, `volume.low`, ...) to
/// display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    entries: BTreeMap<String, String>,
}

const KEYS: &[&str] = &[
    "playing",
    "paused",
    "stopped",
    "shuffle.enabled",
    "shuffle.disabled",
    "volume.muted",
    "volume.low",
    "volume.medium",
    "volume.high",
    "progress.mark",
    "progress.filled",
    "progress.remaining",
];

impl SymbolTable {
    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn default_symbols() -> Self {
        Self::from_pairs(&[
            ("playing", "►"),
            ("paused", "■"),
            ("stopped", "■"),
            ("shuffle.enabled", "🔀"),
            ("shuffle.disabled", "➡"),
            ("volume.muted", "🔇"),
            ("volume.low", "🔈"),
            ("volume.medium", "🔉"),
            ("volume.high", "🔊"),
            ("progress.mark", "●"),
            ("progress.filled", "━"),
            ("progress.remaining", "─"),
        ])
    }

    pub fn default_states() -> Self {
        Self::from_pairs(&[
            ("playing", "Playing"),
            ("paused", "Paused"),
            ("stopped", "Stopped"),
            ("shuffle.enabled", "On"),
            ("shuffle.disabled", "Off"),
            ("volume.muted", "Muted"),
            ("volume.low", "Low"),
            ("volume.medium", "Medium"),
            ("volume.high", "High"),
            ("progress.mark", ""),
            ("progress.filled", ""),
            ("progress.remaining", ""),
        ])
    }

    /// Missing keys resolve to an empty string.
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }

    #[cfg(test)]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    fn overlay(mut self, overrides: BTreeMap<String, String>) -> Self {
        for (key, value) in overrides {
            if !KEYS.contains(&key.as_str()) {
                tracing::warn!("Ignoring unknown symbol key `{key}`");
                continue;
            }
            self.entries.insert(key, value);
        }
        self
    }
}

/// A symbol override as written by the user: TOML turns unquoted dotted keys
/// into nested tables, so both shapes are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Text(String),
    Nested(BTreeMap<String, RawEntry>),
}

fn flatten(prefix: &str, raw: BTreeMap<String, RawEntry>, out: &mut BTreeMap<String, String>) {
    for (key, entry) in raw {
        let key = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match entry {
            RawEntry::Text(text) => {
                out.insert(key, text);
            }
            RawEntry::Nested(nested) => flatten(&key, nested, out),
        }
    }
}

fn deserialize_overrides<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, RawEntry>::deserialize(deserializer)?;
    let mut flat = BTreeMap::new();
    flatten("", raw, &mut flat);
    Ok(flat)
}

pub(super) fn deserialize_symbols<'de, D>(deserializer: D) -> Result<SymbolTable, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = deserialize_overrides(deserializer)?;
    Ok(SymbolTable::default_symbols().overlay(overrides))
}

pub(super) fn deserialize_states<'de, D>(deserializer: D) -> Result<SymbolTable, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = deserialize_overrides(deserializer)?;
    Ok(SymbolTable::default_states().overlay(overrides))
}
