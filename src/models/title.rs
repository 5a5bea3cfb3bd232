use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// 标题页字段（固定的封闭集合）
///
/// Aliases collapse onto one canonical key: `author`/`authors` and
/// `draft date`/`date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleKey {
    Title,
    Credit,
    Author,
    Source,
    DraftDate,
    Contact,
    Copyright,
    Notes,
}

impl TitleKey {
    pub const ALL: [TitleKey; 8] = [
        TitleKey::Title,
        TitleKey::Credit,
        TitleKey::Author,
        TitleKey::Source,
        TitleKey::DraftDate,
        TitleKey::Contact,
        TitleKey::Copyright,
        TitleKey::Notes,
    ];

    /// Looks up the text before a title line's first colon.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "title" => Some(TitleKey::Title),
            "credit" => Some(TitleKey::Credit),
            "author" | "authors" => Some(TitleKey::Author),
            "source" => Some(TitleKey::Source),
            "draft date" | "date" => Some(TitleKey::DraftDate),
            "contact" => Some(TitleKey::Contact),
            "copyright" => Some(TitleKey::Copyright),
            "notes" => Some(TitleKey::Notes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKey::Title => "title",
            TitleKey::Credit => "credit",
            TitleKey::Author => "author",
            TitleKey::Source => "source",
            TitleKey::DraftDate => "draft date",
            TitleKey::Contact => "contact",
            TitleKey::Copyright => "copyright",
            TitleKey::Notes => "notes",
        }
    }
}

impl fmt::Display for TitleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title page metadata, iterated in canonical key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TitleFields(BTreeMap<TitleKey, String>);

impl TitleFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-declaring a key overwrites the earlier value.
    pub fn insert(&mut self, key: TitleKey, value: String) -> Option<String> {
        self.0.insert(key, value)
    }

    pub(crate) fn get_mut(&mut self, key: TitleKey) -> Option<&mut String> {
        self.0.get_mut(&key)
    }

    pub fn get(&self, key: TitleKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: TitleKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TitleKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the fields back into `key: value` lines.
    ///
    /// Multi-line values were joined with spaces on the way in, so each field
    /// is written on a single line.
    pub fn to_source(&self) -> String {
        let mut buffer = String::new();
        for (key, value) in self.iter() {
            buffer.push_str(key.as_str());
            buffer.push_str(": ");
            buffer.push_str(value);
            buffer.push('\n');
        }
        buffer
    }
}
