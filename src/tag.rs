//! Tags and sum type declarations.

use core::{borrow::Borrow, fmt, ops::Deref};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SumError};

/// The discriminant of a sum type member.
///
/// A tag is a non-empty name. Cloning is cheap, and a tag borrows as `str`,
/// so maps keyed by [`Tag`] can be queried with plain string slices.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(Arc<str>);

impl Tag {
    /// Creates a tag, rejecting the empty string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagged_sum::Tag;
    ///
    /// assert_eq!(Tag::new("Rain").unwrap().as_str(), "Rain");
    /// assert!(Tag::new("").is_err());
    /// ```
    pub fn new(name: impl Into<Arc<str>>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SumError::EmptyTag);
        }
        Ok(Tag(name))
    }

    /// Creates a tag that must be declared by `S`.
    pub fn declared<S: SumType>(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(SumError::EmptyTag);
        }
        if !S::MEMBERS.contains(name) {
            return Err(SumError::UnknownTag {
                sum: S::NAME,
                tag: name.into(),
            });
        }
        Ok(Tag(Arc::from(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Tag {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl TryFrom<String> for Tag {
    type Error = SumError;

    fn try_from(value: String) -> Result<Self> {
        Tag::new(value)
    }
}

impl TryFrom<&str> for Tag {
    type Error = SumError;

    fn try_from(value: &str) -> Result<Self> {
        Tag::new(value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> String {
        tag.0.as_ref().to_owned()
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of tags a sum type declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Members {
    /// A fixed, finite list of tags.
    Closed(&'static [&'static str]),
    /// Every non-empty tag.
    Open,
}

impl Members {
    pub fn contains(&self, tag: &str) -> bool {
        match self {
            Members::Closed(tags) => tags.contains(&tag),
            Members::Open => !tag.is_empty(),
        }
    }

    /// The declared tags, or `None` for an open set.
    pub fn tags(&self) -> Option<&'static [&'static str]> {
        match self {
            Members::Closed(tags) => Some(tags),
            Members::Open => None,
        }
    }
}

/// A sum type declaration.
///
/// Implementors are usually uninhabited marker types produced by
/// [`sum_type!`](crate::sum_type); members of the sum are
/// [`Member<Self>`](crate::Member) values.
pub trait SumType: 'static {
    /// Name used in errors and logs.
    const NAME: &'static str;

    /// The declared tags.
    const MEMBERS: Members;
}
