//! The document record exchanged with the tags API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Separator the API uses between tags in a single string.
pub const TAG_SEP: char = '\u{1F}';

/// How a document's content is interpreted.
///
/// Tags the API does not know about are kept verbatim in [`DocType::Other`]
/// and render like plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocType {
    #[default]
    Text,
    Url,
    Pdf,
    Ps,
    Other(String),
}

impl DocType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Pdf => "pdf",
            Self::Ps => "ps",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url)
    }
}

impl From<&str> for DocType {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "url" => Self::Url,
            "pdf" => Self::Pdf,
            "ps" => Self::Ps,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for DocType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<DocType> for String {
    fn from(kind: DocType) -> Self {
        match kind {
            DocType::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One document as the API serializes it.
///
/// `Id` and `Uid` are assigned by the server and are absent on records built
/// in the page. `Tags: null` is accepted as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: DocType,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i32>,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<DocType>,
        content: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: kind.into(),
            content: content.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            uid: None,
        }
    }

    /// Tags as shown in a card header.
    pub fn joined_tags(&self) -> String {
        self.tags.join(", ")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Splits a free-form tag string the way the server does.
///
/// Tags are separated by the unit separator, spaces, commas, newlines or tabs;
/// empty pieces are dropped.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(|c: char| matches!(c, TAG_SEP | ' ' | ',' | '\n' | '\t'))
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}
