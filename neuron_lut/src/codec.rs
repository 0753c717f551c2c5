//! Text-keyed form of a table and its JSON artifact.
//!
//! The artifact is a single JSON object mapping canonical tuple keys to
//! results, pretty-printed with four-space indentation:
//!
//! ```text
//! {
//!     "(0, 0)": 0,
//!     "(0, 1)": 0,
//!     "(1, 0)": 0,
//!     "(1, 1)": 1
//! }
//! ```

use std::{
    collections::{BTreeMap, HashMap, btree_map::Entry},
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use tempfile::NamedTempFile;

use crate::{
    builder::PrecomputedTable,
    error::{LutError, Result},
    tuple::InputTuple,
};

/// Text-keyed table, as persisted and as consumed by queries.
///
/// Keeps entries in insertion order. Never mutated once built, so it can be
/// shared freely between readers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerializedTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl SerializedTable {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// A repeated key overwrites the value but keeps the first position.
    fn insert(&mut self, key: String, value: u64) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), *value))
    }

    pub fn to_writer_pretty<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.to_writer_pretty(&mut buf)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load an artifact written by [`SerializedTable::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader(BufReader::new(File::open(path)?))?;
        tracing::debug!("loaded {} entries from {}", table.len(), path.display());
        Ok(table)
    }

    /// Write the artifact to `path`.
    ///
    /// The content goes to a temporary file next to `path` first and is
    /// renamed into place, so a failed save never leaves a partial file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        let mut writer = BufWriter::new(file.as_file_mut());
        self.to_writer_pretty(&mut writer)?;
        writer.flush()?;
        drop(writer);
        file.persist(path).map_err(|e| e.error)?;

        tracing::debug!("saved {} entries to {}", self.len(), path.display());
        Ok(())
    }
}

impl FromIterator<(String, u64)> for SerializedTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut table = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl Serialize for SerializedTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

struct SerializedTableVisitor;

impl<'de> Visitor<'de> for SerializedTableVisitor {
    type Value = SerializedTable;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from tuple keys to non-negative integers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut table = SerializedTable::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, u64>()? {
            table.insert(key, value);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for SerializedTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SerializedTableVisitor)
    }
}

/// Re-key a table by the canonical rendering of each tuple.
pub fn serialize(table: &PrecomputedTable) -> SerializedTable {
    table
        .iter()
        .map(|(inputs, result)| (inputs.primary_key(), result))
        .collect()
}

/// Parse every key of a text-keyed table back into a tuple.
///
/// Keys in either rendering are accepted. Two keys naming the same tuple are
/// rejected.
pub fn deserialize(table: &SerializedTable) -> Result<PrecomputedTable> {
    let mut entries = BTreeMap::new();
    for (key, result) in table.iter() {
        let inputs = key
            .parse::<InputTuple>()
            .map_err(|_| LutError::MalformedEntry {
                key: key.to_string(),
                reason: "key is not a tuple of non-negative integers".to_string(),
            })?;
        match entries.entry(inputs) {
            Entry::Vacant(slot) => {
                slot.insert(result);
            }
            Entry::Occupied(slot) => {
                return Err(LutError::MalformedEntry {
                    key: key.to_string(),
                    reason: format!("duplicates the entry for {}", slot.key()),
                });
            }
        }
    }
    Ok(PrecomputedTable::from_entries(entries))
}
