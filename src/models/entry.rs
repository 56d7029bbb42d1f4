//! Lexical entries.
//!
//! An [`Entry`] is one sense of a word in one language, keyed by a
//! [`NodeId`]. The structured columns of the `entries` table are decoded into
//! typed values; each one is independently optional so a single malformed
//! column never makes the rest of the record unusable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default cap on entries returned by a word lookup.
pub const DEFAULT_ENTRY_LIMIT: usize = 50;

/// Unique identifier for a lexical entry.
///
/// Ids are produced at ingestion time as `lang_code:word:pos:etymology_number`
/// but are otherwise opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node ID from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the node ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the id into its ingestion-time components.
    ///
    /// Returns `None` for ids that do not follow the
    /// `lang_code:word:pos:etymology_number` layout. Words may themselves
    /// contain `:`, so only the first and the last two separators are
    /// significant.
    #[must_use]
    pub fn parts(&self) -> Option<NodeIdParts<'_>> {
        let (lang_code, rest) = self.0.split_once(':')?;
        let (rest, ety) = rest.rsplit_once(':')?;
        let (word, pos) = rest.rsplit_once(':')?;
        let etymology_number = ety.parse().ok()?;

        Some(NodeIdParts {
            lang_code,
            word,
            pos: (!pos.is_empty()).then_some(pos),
            etymology_number,
        })
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Components of a well-formed [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIdParts<'a> {
    /// Language code.
    pub lang_code: &'a str,
    /// Headword.
    pub word: &'a str,
    /// Part of speech, `None` when the id carries an empty segment.
    pub pos: Option<&'a str>,
    /// Etymology number (0 when the source had none).
    pub etymology_number: i64,
}

/// One lexical sense of a word in a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier.
    pub node_id: NodeId,
    /// Display text.
    pub word: String,
    /// Language name (e.g. "Latin").
    pub lang: Option<String>,
    /// Language code (e.g. "la").
    pub lang_code: String,
    /// Part of speech.
    pub pos: Option<String>,
    /// Disambiguates several etymologies of the same word and language.
    pub etymology_number: Option<i64>,
    /// Free-text etymology.
    pub etymology_text: Option<String>,
    /// Etymology templates as recorded by the source dictionary.
    pub etymology_templates: Option<Vec<EtymologyTemplate>>,
    /// Terms derived from this entry.
    pub derived: Option<Vec<LinkedTerm>>,
    /// Descendant notes as recorded by the source dictionary.
    pub descendants: Option<Vec<DescendantNote>>,
    /// Entries this one is an alternative form of.
    pub alt_of: Option<Vec<LinkedTerm>>,
    /// Lemmas this entry is an inflected form of.
    pub form_of: Option<Vec<LinkedTerm>>,
    /// Dictionary categories.
    pub categories: Option<Vec<Category>>,
    /// Redirect targets.
    pub redirects: Option<Vec<LinkedTerm>>,
    /// Literal meaning, for compounds and calques.
    pub literal_meaning: Option<String>,
    /// External knowledge-base identifier.
    pub wikidata: Option<String>,
}

impl Entry {
    /// Creates an entry with only its identity fields set.
    #[must_use]
    pub fn new(
        node_id: impl Into<NodeId>,
        word: impl Into<String>,
        lang_code: impl Into<String>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            word: word.into(),
            lang: None,
            lang_code: lang_code.into(),
            pos: None,
            etymology_number: None,
            etymology_text: None,
            etymology_templates: None,
            derived: None,
            descendants: None,
            alt_of: None,
            form_of: None,
            categories: None,
            redirects: None,
            literal_meaning: None,
            wikidata: None,
        }
    }

    /// Sets the part of speech.
    #[must_use]
    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Sets the language name.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Sets the etymology number.
    #[must_use]
    pub const fn with_etymology_number(mut self, n: i64) -> Self {
        self.etymology_number = Some(n);
        self
    }

    /// Etymology number with a missing value read as 0.
    #[must_use]
    pub fn etymology_index(&self) -> i64 {
        self.etymology_number.unwrap_or(0)
    }

    /// Whether this is a noun sense of the first (or only) etymology.
    #[must_use]
    pub fn is_primary_noun(&self) -> bool {
        self.pos.as_deref() == Some("noun") && self.etymology_index() == 0
    }
}

/// An etymology template invocation, e.g. `{{inh|en|la|historia}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtymologyTemplate {
    /// Template name (`inh`, `bor`, `der`, ...).
    pub name: String,
    /// Positional and named arguments, keyed by their position or name.
    #[serde(default)]
    pub args: BTreeMap<String, String>,
    /// Rendered text.
    #[serde(default)]
    pub expansion: Option<String>,
}

/// A reference to another term, as found in `derived`, `alt_of`, `form_of`
/// and `redirects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedTerm {
    /// The referenced word.
    pub word: String,
    /// Language code, falling back to the language name when the source
    /// recorded only that. `None` for bare-string references.
    pub lang_code: Option<String>,
}

/// Source representation of a [`LinkedTerm`]: either a bare word or an
/// object with at least a `word` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LinkedTermRepr {
    Bare(String),
    Object {
        word: Option<String>,
        lang_code: Option<String>,
        lang: Option<String>,
    },
}

impl LinkedTermRepr {
    /// Converts to a [`LinkedTerm`], dropping references without a word.
    pub(crate) fn into_term(self) -> Option<LinkedTerm> {
        match self {
            Self::Bare(word) => Some(LinkedTerm {
                word,
                lang_code: None,
            }),
            Self::Object {
                word,
                lang_code,
                lang,
            } => {
                let word = word.filter(|w| !w.is_empty())?;
                Some(LinkedTerm {
                    word,
                    lang_code: lang_code.or(lang),
                })
            },
        }
    }
}

/// One line of a dictionary "Descendants" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescendantNote {
    /// Nesting depth within the section.
    #[serde(default)]
    pub depth: Option<u32>,
    /// Language name.
    #[serde(default)]
    pub lang: Option<String>,
    /// Language code.
    #[serde(default)]
    pub lang_code: Option<String>,
    /// Descendant word, if the line names one.
    #[serde(default)]
    pub word: Option<String>,
    /// Raw line text.
    #[serde(default)]
    pub text: Option<String>,
    /// Qualifier tags (`borrowed`, `learned`, ...).
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A dictionary category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryRepr")]
pub struct Category {
    /// Category name.
    pub name: String,
    /// Category kind, when the source records one.
    pub kind: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Name(String),
    Detailed { name: String, kind: Option<String> },
}

impl From<CategoryRepr> for Category {
    fn from(repr: CategoryRepr) -> Self {
        match repr {
            CategoryRepr::Name(name) => Self { name, kind: None },
            CategoryRepr::Detailed { name, kind } => Self { name, kind },
        }
    }
}

/// Options for looking up entries by word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    /// Restrict to one language code.
    pub lang_code: Option<String>,
    /// Maximum entries returned ([`DEFAULT_ENTRY_LIMIT`] when unset).
    pub limit: Option<usize>,
}

impl EntryQuery {
    /// Creates an unfiltered query with the default limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to a language code.
    #[must_use]
    pub fn with_lang_code(mut self, lang_code: impl Into<String>) -> Self {
        self.lang_code = Some(lang_code.into());
        self
    }

    /// Caps the number of entries returned.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Effective limit.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_ENTRY_LIMIT)
    }
}
