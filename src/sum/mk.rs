//! Member constructors.

use core::{fmt, marker::PhantomData, ptr};
use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use super::repr::Member;
use crate::{
    error::{Result, SumError},
    tag::{SumType, Tag},
};

/// Builds members of `S` for one tag.
///
/// Equality of constructors is identity: two constructors are equal only if
/// they are the same object, which is what [`Constructors::get`] guarantees
/// for repeated access to the same tag.
pub struct Constructor<S: ?Sized> {
    tag: Tag,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType> Constructor<S> {
    /// Builds a standalone constructor for `tag`.
    ///
    /// Prefer [`Constructors::get`], which caches constructors per tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagged_sum::{sum_type, Constructor};
    ///
    /// sum_type!(Weather = Sun | Rain);
    ///
    /// let rain = Constructor::<Weather>::new("Rain").unwrap();
    /// assert_eq!(rain.call(5), rain.call(5));
    /// assert!(Constructor::<Weather>::new("Snow").is_err());
    /// ```
    pub fn new(tag: &str) -> Result<Self> {
        Tag::declared::<S>(tag).map(Self::from_tag)
    }

    fn from_tag(tag: Tag) -> Self {
        Constructor {
            tag,
            _sum: PhantomData,
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Builds the member carrying `value`.
    ///
    /// JSON has no NaN or infinities: a non-finite float converts to `null`,
    /// so `call(f64::NAN)` equals [`unit`](Self::unit). Check floats before
    /// calling when the distinction matters.
    pub fn call(&self, value: impl Into<Value>) -> Member<S> {
        Member::new_unchecked(self.tag.clone(), value.into())
    }

    /// Builds the nullary member, whose payload is `null`.
    pub fn unit(&self) -> Member<S> {
        self.call(Value::Null)
    }

    /// Builds the member carrying the serde encoding of `value`.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Member<S>> {
        let value = serde_json::to_value(value).map_err(|source| SumError::Payload {
            sum: S::NAME,
            tag: self.tag.to_string(),
            source,
        })?;
        Ok(self.call(value))
    }
}

impl<S: ?Sized> PartialEq for Constructor<S> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl<S: ?Sized> Eq for Constructor<S> {}

impl<S: SumType> fmt::Debug for Constructor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constructor({}::{} @ {:p})", S::NAME, self.tag, self)
    }
}

/// The constructors of every tag of `S`, built on first access.
pub struct Constructors<S: ?Sized> {
    cache: RwLock<HashMap<Tag, Arc<Constructor<S>>>>,
}

impl<S: SumType> Constructors<S> {
    pub fn new() -> Self {
        Constructors {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the constructor for `tag`, building and caching it on first
    /// access.
    ///
    /// Every later call for the same tag returns the same `Arc`, including
    /// calls racing on another thread.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use tagged_sum::{create, sum_type};
    ///
    /// sum_type!(Weather = Sun | Rain | Snow);
    ///
    /// let weather = create::<Weather>();
    /// let sun = weather.mk().get("Sun").unwrap();
    /// assert!(Arc::ptr_eq(&sun, &weather.mk().get("Sun").unwrap()));
    /// assert!(!Arc::ptr_eq(&sun, &weather.mk().get("Snow").unwrap()));
    /// ```
    pub fn get(&self, tag: &str) -> Result<Arc<Constructor<S>>> {
        if let Some(constructor) = self.cache.read().get(tag) {
            return Ok(Arc::clone(constructor));
        }

        let tag = Tag::declared::<S>(tag)?;
        let mut cache = self.cache.write();
        let constructor = cache.entry(tag).or_insert_with_key(|tag| {
            trace!(sum = S::NAME, %tag, "populating constructor cache");
            Arc::new(Constructor::from_tag(tag.clone()))
        });
        Ok(Arc::clone(constructor))
    }

    /// Shorthand for `get(tag)?.call(value)`. Non-finite floats become `null`,
    /// as with [`Constructor::call`].
    pub fn make(&self, tag: &str, value: impl Into<Value>) -> Result<Member<S>> {
        Ok(self.get(tag)?.call(value))
    }

    /// Number of constructors built so far.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Tags whose constructors have been built, sorted.
    pub fn cached_tags(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self.cache.read().keys().cloned().collect();
        tags.sort();
        tags
    }
}

impl<S: SumType> Default for Constructors<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SumType> fmt::Debug for Constructors<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructors")
            .field("sum", &S::NAME)
            .field("cached", &self.cached_tags())
            .finish()
    }
}
