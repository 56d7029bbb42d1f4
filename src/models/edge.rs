//! Typed relations between lexical entries.

use crate::models::NodeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Type tag of an [`Edge`].
///
/// The ingestion pipeline produces the five named variants; any other tag is
/// preserved verbatim in [`RelationType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// Variant spelling → canonical form.
    AltOf,
    /// Inflected form → lemma.
    FormOf,
    /// Page → redirect target.
    Redirect,
    /// Word → term derived from it.
    Derived,
    /// Word → descendant in a later language. Traversal follows these.
    Descendant,
    /// Any other tag.
    Other(String),
}

impl RelationType {
    /// Returns the tag as stored in the `edges` table.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AltOf => "alt_of",
            Self::FormOf => "form_of",
            Self::Redirect => "redirect",
            Self::Derived => "derived",
            Self::Descendant => "descendant",
            Self::Other(tag) => tag,
        }
    }

    /// Parses a stored tag. Matching is exact; unknown tags become `Other`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "alt_of" => Self::AltOf,
            "form_of" => Self::FormOf,
            "redirect" => Self::Redirect,
            "derived" => Self::Derived,
            "descendant" => Self::Descendant,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for RelationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RelationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// A directed, typed relation between two entries.
///
/// Endpoints are not guaranteed to exist in the `entries` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Row id, used as the insertion-order tie-break.
    pub id: i64,
    /// Source entry.
    pub src_id: NodeId,
    /// Destination entry.
    pub dst_id: NodeId,
    /// Relation tag.
    pub relation_type: RelationType,
}

impl Edge {
    /// Returns the endpoint opposite `node`, or `None` if `node` is not an
    /// endpoint of this edge.
    #[must_use]
    pub fn other_end(&self, node: &NodeId) -> Option<&NodeId> {
        if &self.src_id == node {
            Some(&self.dst_id)
        } else if &self.dst_id == node {
            Some(&self.src_id)
        } else {
            None
        }
    }
}

/// An adjacent entry's identity fields plus the connecting relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Adjacent entry.
    pub node_id: NodeId,
    /// Adjacent entry's word.
    pub word: String,
    /// Adjacent entry's language name.
    pub lang: Option<String>,
    /// Adjacent entry's language code.
    pub lang_code: String,
    /// Adjacent entry's part of speech.
    pub pos: Option<String>,
    /// Adjacent entry's etymology number.
    pub etymology_number: Option<i64>,
    /// Tag of the connecting edge.
    pub relation_type: RelationType,
}
