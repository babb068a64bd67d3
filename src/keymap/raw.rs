//! Raw binding tables as authored: chord text → [command, description]
//!
//! Raw tables travel as JSON or YAML maps. Source order is kept and duplicate
//! keys are not collapsed here, so the compiler can report overrides.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One authored binding, before its chord text has been parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBinding {
    pub chord: String,
    pub command: String,
    pub description: String,
}

impl RawBinding {
    pub fn new(
        chord: impl Into<String>,
        command: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            chord: chord.into(),
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Ordered sequence of raw bindings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBindingTable {
    entries: Vec<RawBinding>,
}

impl RawBindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(chord, command, description)` triples
    pub fn from_static(entries: &[(&str, &str, &str)]) -> Self {
        entries
            .iter()
            .map(|(chord, command, description)| RawBinding::new(*chord, *command, *description))
            .collect()
    }

    pub fn push(&mut self, binding: RawBinding) {
        self.entries.push(binding);
    }

    /// Append another table after this one; its entries win on conflict when compiled
    pub fn layer(mut self, overrides: RawBindingTable) -> Self {
        self.entries.extend(overrides.entries);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawBinding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

impl FromIterator<RawBinding> for RawBindingTable {
    fn from_iter<I: IntoIterator<Item = RawBinding>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RawBindingTable {
    type Item = RawBinding;
    type IntoIter = std::vec::IntoIter<RawBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a RawBindingTable {
    type Item = &'a RawBinding;
    type IntoIter = std::slice::Iter<'a, RawBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Value side of a raw entry: `"command"` or `["command", "description"]`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Name(String),
    Pair(String, String),
}

impl<'de> Deserialize<'de> for RawBindingTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RawBindingTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of chord text to [command, description]")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((chord, value)) = map.next_entry::<String, RawValue>()? {
                    let (command, description) = match value {
                        RawValue::Name(command) => (command, String::new()),
                        RawValue::Pair(command, description) => (command, description),
                    };
                    entries.push(RawBinding {
                        chord,
                        command,
                        description,
                    });
                }
                Ok(RawBindingTable { entries })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

impl Serialize for RawBindingTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.chord, &[&entry.command, &entry.description])?;
        }
        map.end()
    }
}

/// Errors that can occur when loading a keymap file
#[derive(Debug, thiserror::Error)]
pub enum KeymapFileError {
    #[error("failed to read keymap {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON keymap {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML keymap {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unsupported keymap format {} (expected .json, .yaml or .yml)", .path.display())]
    UnknownFormat { path: PathBuf },
}

/// Load a raw binding table from a `.json`, `.yaml` or `.yml` file
pub fn load_raw_bindings(path: &Path) -> Result<RawBindingTable, KeymapFileError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let content = || {
        std::fs::read_to_string(path).map_err(|source| KeymapFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let table = match ext.as_deref() {
        Some("json") => {
            RawBindingTable::from_json(&content()?).map_err(|source| KeymapFileError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        Some("yaml" | "yml") => {
            RawBindingTable::from_yaml(&content()?).map_err(|source| KeymapFileError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => {
            return Err(KeymapFileError::UnknownFormat {
                path: path.to_path_buf(),
            })
        }
    };

    tracing::debug!("Loaded {} raw bindings from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_keeps_order() {
        let json = r##"{
            "#38": ["backward", "Navigate backward"],
            "#40": ["forward", "Navigate forward"],
            "Shift+#37": ["nop", ""]
        }"##;
        let table = RawBindingTable::from_json(json).unwrap();
        let chords: Vec<_> = table.iter().map(|b| b.chord.as_str()).collect();
        assert_eq!(chords, ["#38", "#40", "Shift+#37"]);
        assert_eq!(table.iter().next().unwrap().description, "Navigate backward");
    }

    #[test]
    fn test_parse_json_keeps_duplicate_keys() {
        let json = r##"{"#38": ["backward", "a"], "#38": ["forward", "b"]}"##;
        let table = RawBindingTable::from_json(json).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_bare_command_value() {
        let json = r##"{"#9": "handleTab"}"##;
        let table = RawBindingTable::from_json(json).unwrap();
        let entry = table.iter().next().unwrap();
        assert_eq!(entry.command, "handleTab");
        assert_eq!(entry.description, "");
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r##"
"Ctrl+Alt+B": [showBookmarkManager, Open bookmark manager]
"#13": [actOnCurrentItem, Take action on current item]
"##;
        let table = RawBindingTable::from_yaml(yaml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().nth(1).unwrap().command, "actOnCurrentItem");
    }

    #[test]
    fn test_rejects_non_map() {
        assert!(RawBindingTable::from_json(r#"["backward"]"#).is_err());
        assert!(RawBindingTable::from_json(r##"{"#38": 5}"##).is_err());
    }

    #[test]
    fn test_json_export_reparses() {
        let table = RawBindingTable::from_static(&[
            ("#17", "stopSpeech", "Stop speaking"),
            ("Shift+#16", "nop", ""),
        ]);
        let json = table.to_json().unwrap();
        assert_eq!(RawBindingTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_layer_appends_after_base() {
        let base = RawBindingTable::from_static(&[("#38", "backward", "")]);
        let user = RawBindingTable::from_static(&[("#38", "forward", "")]);
        let layered = base.layer(user);
        let commands: Vec<_> = layered.iter().map(|b| b.command.as_str()).collect();
        assert_eq!(commands, ["backward", "forward"]);
    }

    #[test]
    fn test_load_unknown_extension() {
        let err = load_raw_bindings(Path::new("keymap.toml")).unwrap_err();
        assert!(matches!(err, KeymapFileError::UnknownFormat { .. }));
    }
}
