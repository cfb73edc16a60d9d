// Article record — an ordered map of named text fields.
//
// Field order follows the source file's columns so outputs keep the same
// column layout. Any field may be missing; lookups hand back `None` and
// comparison text treats that as an empty string.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Well-known field names produced by the article extractor.
pub mod fields {
    pub const TITLE: &str = "Title";
    pub const PUBLISH_DATE: &str = "Publish Date";
    pub const META_DESCRIPTION: &str = "Meta Description";
    pub const CANONICAL_LINK: &str = "Canonical Link";
    pub const ARTICLE_CONTENT: &str = "Article Content";
    pub const YOAST_SCHEMA_GRAPH: &str = "Yoast Schema Graph";

    /// Added to records classified as unique.
    pub const UNIQUENESS_SCORE: &str = "Uniqueness_Score";
    /// Added to records returned by a similarity search.
    pub const TOPIC: &str = "Topic";
    pub const SIMILARITY: &str = "Similarity";
    pub const SIMILAR_TITLE: &str = "Similar Title";
}

/// One extracted article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (name, value) pairs. A repeated name keeps the later value
    /// at the earlier position.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (k, v) in pairs {
            record.set(k, v);
        }
        record
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a field, replacing an existing value in place or appending.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// The identity key used for dedup. Missing titles key as "".
    pub fn title(&self) -> &str {
        self.get(fields::TITLE).unwrap_or("")
    }

    /// Title and meta description joined by a single space, the text every
    /// comparison runs on.
    pub fn comparison_text(&self) -> String {
        format!(
            "{} {}",
            self.get(fields::TITLE).unwrap_or(""),
            self.get(fields::META_DESCRIPTION).unwrap_or("")
        )
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A copy with `extra` fields placed before the existing ones.
    pub fn with_leading(&self, extra: &[(&str, String)]) -> Self {
        let mut record = Self::from_pairs(extra.iter().map(|(k, v)| (k.to_string(), v.clone())));
        for (k, v) in &self.fields {
            if record.get(k).is_none() {
                record.fields.push((k.clone(), v.clone()));
            }
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            // Non-string values degrade to their text form; null means absent
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => record.set(key, s),
                other => record.set(key, other.to_string()),
            }
        }
        Ok(record)
    }
}
