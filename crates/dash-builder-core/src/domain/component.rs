//! Pattern-matching component identifiers.
//!
//! Dash addresses components either by a flat string id or by a dictionary
//! id. Views use dictionary ids of the form `{"type": ..., "index": ...}` so
//! that callbacks can target one instance or every instance of a view:
//!
//! ```text
//! {"type": "header-logo", "index": "main"}    one component
//! {"type": "header-logo", "index": ["MATCH"]} the matching instance
//! {"type": "header-logo", "index": ["ALL"]}   every instance
//! ```
//!
//! `type` is derived from the owning view's class name (see
//! [`crate::domain::naming::to_kebab_case`]) and is identical for every
//! instance of that view. `index` is chosen by the caller.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeSeq};

use super::naming::to_kebab_case;

/// Reserved index values for pattern-matching callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wildcard {
    /// Pairs with exactly one component of the same type in the same callback.
    Match,
    /// Matches every component of the type.
    All,
}

impl Wildcard {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "MATCH",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `index` half of a [`ComponentId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentIndex {
    /// Caller-chosen logical identifier. Uniqueness within a type is the
    /// caller's responsibility.
    Value(String),
    Wildcard(Wildcard),
}

impl From<&str> for ComponentIndex {
    fn from(s: &str) -> Self {
        Self::Value(s.to_owned())
    }
}

impl From<String> for ComponentIndex {
    fn from(s: String) -> Self {
        Self::Value(s)
    }
}

impl From<Wildcard> for ComponentIndex {
    fn from(w: Wildcard) -> Self {
        Self::Wildcard(w)
    }
}

impl Serialize for ComponentIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_str(v),
            // Dash encodes wildcards as a one-element list.
            Self::Wildcard(w) => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(w.as_str())?;
                seq.end()
            }
        }
    }
}

/// Structured `{type, index}` component id.
///
/// Built fresh on every layout render; equality is field-by-field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ComponentId {
    #[serde(rename = "type")]
    kind: String,
    index: ComponentIndex,
}

impl ComponentId {
    pub fn new(kind: impl Into<String>, index: impl Into<ComponentIndex>) -> Self {
        Self {
            kind: kind.into(),
            index: index.into(),
        }
    }

    /// The `type` field.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn index(&self) -> &ComponentIndex {
        &self.index
    }

    /// Same type, `MATCH` index.
    pub fn matched(&self) -> Self {
        Self::new(self.kind.clone(), Wildcard::Match)
    }

    /// Same type, `ALL` index.
    pub fn all(&self) -> Self {
        Self::new(self.kind.clone(), Wildcard::All)
    }
}

/// Derive the `type` field for a view class, optionally suffixed with a
/// sub-component name: `("Header", Some("logo"))` → `header-logo`.
pub fn type_name_for(owner_type_name: &str, subname: Option<&str>) -> String {
    let mut name = to_kebab_case(owner_type_name);
    if let Some(sub) = subname {
        name.push('-');
        name.push_str(sub);
    }
    name
}

/// Build the id of one component owned by `owner_type_name`.
///
/// An empty owner name yields an empty `type`; it is accepted but two views
/// built that way can never be told apart.
pub fn identifier_for(
    owner_type_name: &str,
    index: impl Into<ComponentIndex>,
    subname: Option<&str>,
) -> ComponentId {
    ComponentId::new(type_name_for(owner_type_name, subname), index)
}
