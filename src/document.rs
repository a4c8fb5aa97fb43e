//! JSON share documents.
//!
//! ```text
//! {
//!   "keys": { "n": 4, "k": 3 },
//!   "1": { "base": "10", "value": "4" },
//!   "2": { "base": "2", "value": "111" },
//!   ...
//! }
//! ```
//!
//! The outer key of each entry is the share index (its x-coordinate). Entries
//! are read off the JSON object one by one instead of through a map so that a
//! repeated index is reported rather than silently overwritten.

use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::error::Category;
use serde_json::Value as Json;

use crate::error::{Result, ShareError};
use crate::radix;

const KEYS_FIELD: &str = "keys";

/// One share entry as it appears in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawShare {
    pub index: u64,
    pub base: u32,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareDocument {
    pub n: u64,
    pub k: u64,
    /// Shares in document order.
    pub shares: Vec<RawShare>,
}

impl ShareDocument {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Entries = serde_json::from_reader(reader).map_err(json_error)?;
        Self::from_entries(entries)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let entries: Entries = serde_json::from_slice(bytes).map_err(json_error)?;
        Self::from_entries(entries)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShareError::MalformedDocument(e.to_string()))
    }

    fn from_entries(entries: Entries) -> Result<Self> {
        let mut keys = None;
        let mut shares = Vec::with_capacity(entries.0.len());
        let mut seen = HashSet::new();

        for (key, value) in entries.0 {
            if key == KEYS_FIELD {
                if keys.replace(value).is_some() {
                    return Err(ShareError::MalformedDocument(
                        "\"keys\" record appears more than once".to_string(),
                    ));
                }
                continue;
            }

            let index = parse_index(&key)?;
            if !seen.insert(index) {
                return Err(ShareError::DuplicateIndex(index));
            }
            shares.push(RawShare::from_json(index, &value)?);
        }

        let keys = keys.ok_or(ShareError::MissingKeys)?;
        let keys = keys.as_object().ok_or(ShareError::MissingKeys)?;
        let n = keys
            .get("n")
            .and_then(Json::as_u64)
            .ok_or(ShareError::MissingNOrK("n"))?;
        let k = keys
            .get("k")
            .and_then(Json::as_u64)
            .ok_or(ShareError::MissingNOrK("k"))?;

        Ok(Self { n, k, shares })
    }
}

impl FromStr for ShareDocument {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

impl RawShare {
    fn from_json(index: u64, entry: &Json) -> Result<Self> {
        let entry = entry.as_object().ok_or_else(|| {
            ShareError::MalformedDocument(format!("share {} is not an object", index))
        })?;

        let base = entry
            .get("base")
            .and_then(Json::as_str)
            .ok_or(ShareError::NonIntegerBase { index })?;
        let base = radix::parse_base(base, index)?;

        let value = entry
            .get("value")
            .and_then(Json::as_str)
            .ok_or(ShareError::ValueNotString { index })?;

        Ok(Self {
            index,
            base,
            value: value.to_string(),
        })
    }
}

/// Share keys are positive decimal integers; "02" and "2" name the same share.
fn parse_index(key: &str) -> Result<u64> {
    let not_an_index = || ShareError::NonIntegerIndex(key.to_string());
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_an_index());
    }
    match key.parse::<u64>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(not_an_index()),
    }
}

fn json_error(e: serde_json::Error) -> ShareError {
    match e.classify() {
        Category::Io => ShareError::Io(e.into()),
        _ => ShareError::MalformedDocument(e.to_string()),
    }
}

/// Top-level object entries in document order, duplicates kept.
struct Entries(Vec<(String, Json)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object of share entries")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Entries, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Json>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Serialize for ShareDocument {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(serde::Serialize)]
        struct Keys {
            n: u64,
            k: u64,
        }

        #[derive(serde::Serialize)]
        struct Entry<'a> {
            base: String,
            value: &'a str,
        }

        let mut map = serializer.serialize_map(Some(self.shares.len() + 1))?;
        map.serialize_entry(KEYS_FIELD, &Keys { n: self.n, k: self.k })?;
        for share in &self.shares {
            map.serialize_entry(
                &share.index.to_string(),
                &Entry {
                    base: share.base.to_string(),
                    value: &share.value,
                },
            )?;
        }
        map.end()
    }
}
