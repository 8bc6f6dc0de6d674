//! Pattern matching over sum type members.
//!
//! A matcher is built from a handler map keyed by tag plus an optional
//! wildcard. Four flavours exist, along two axes:
//!
//! | handler map    | arms                   | result type           | matcher           |
//! |----------------|------------------------|-----------------------|-------------------|
//! | [`Cases`]      | `Fn(&Value) -> B`      | `B`                   | [`Matcher`]       |
//! | [`CasesW`]     | `Fn(&Value) -> R`      | `B`, with `R: Into<B>`| [`Matcher`]       |
//! | [`CasesX`]     | `B`                    | `&B`                  | [`StrictMatcher`] |
//! | [`CasesXW`]    | `impl Into<B>`         | `&B`                  | [`StrictMatcher`] |
//!
//! Building a matcher through [`Sum`](crate::Sum) checks the handler map:
//! every declared tag must have an arm unless there is a wildcard. The
//! `unchecked` builders skip that step; dispatch then fails with
//! [`SumError::Unmatched`] on a gap instead of returning a default.

use core::{fmt, marker::PhantomData};
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    error::{Result, SumError},
    sum::repr::Member,
    tag::{SumType, Tag},
};

type Arm<B> = Box<dyn Fn(&Tag, &Value) -> Result<B> + Send + Sync>;
type Fallback<B> = Box<dyn Fn() -> B + Send + Sync>;

fn arm<B, F>(handler: F) -> Arm<B>
where
    F: Fn(&Tag, &Value) -> Result<B> + Send + Sync + 'static,
{
    Box::new(handler)
}

fn decode<S: SumType, T: DeserializeOwned>(tag: &Tag, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|source| SumError::Payload {
        sum: S::NAME,
        tag: tag.to_string(),
        source,
    })
}

/// Arms keyed by tag, and the wildcard kept apart from them so that no tag
/// can ever shadow it.
pub(crate) struct Table<A, W> {
    arms: HashMap<Box<str>, A>,
    wildcard: Option<W>,
    duplicates: Vec<String>,
}

enum Selected<'a, A, W> {
    Arm(&'a A),
    Wildcard(&'a W),
}

impl<A, W> Table<A, W> {
    fn new() -> Self {
        Table {
            arms: HashMap::new(),
            wildcard: None,
            duplicates: Vec::new(),
        }
    }

    fn insert(&mut self, tag: &str, arm: A) {
        if self.arms.insert(tag.into(), arm).is_some() {
            self.duplicates.push(tag.to_owned());
        }
    }

    fn set_wildcard(&mut self, wildcard: W) {
        self.wildcard = Some(wildcard);
    }

    fn check<S: SumType>(&self) -> Result<()> {
        if let Some(tag) = self.duplicates.first() {
            return Err(SumError::DuplicateArm {
                sum: S::NAME,
                tag: tag.clone(),
            });
        }

        let mut unknown: Vec<&str> = self
            .arms
            .keys()
            .map(|tag| &**tag)
            .filter(|tag| !S::MEMBERS.contains(tag))
            .collect();
        unknown.sort_unstable();
        if let Some(tag) = unknown.first() {
            return Err(SumError::UnknownTag {
                sum: S::NAME,
                tag: (*tag).to_owned(),
            });
        }

        if self.wildcard.is_some() {
            return Ok(());
        }

        let Some(tags) = S::MEMBERS.tags() else {
            return Err(SumError::OpenWithoutWildcard { sum: S::NAME });
        };
        let missing: Vec<String> = tags
            .iter()
            .filter(|tag| !self.arms.contains_key(**tag))
            .map(|tag| (*tag).to_owned())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SumError::NonExhaustive {
                sum: S::NAME,
                missing,
            })
        }
    }

    fn checked<S: SumType>(self) -> Result<Self> {
        self.check::<S>()
            .inspect_err(|err| debug!(sum = S::NAME, %err, "rejected handler map"))?;
        Ok(self)
    }

    fn select<S: SumType>(&self, tag: &Tag) -> Result<Selected<'_, A, W>> {
        if let Some(arm) = self.arms.get(tag.as_str()) {
            return Ok(Selected::Arm(arm));
        }
        if let Some(wildcard) = &self.wildcard {
            trace!(sum = S::NAME, %tag, "falling back to wildcard");
            return Ok(Selected::Wildcard(wildcard));
        }
        debug!(sum = S::NAME, %tag, "no arm and no wildcard");
        Err(SumError::Unmatched {
            sum: S::NAME,
            tag: tag.to_string(),
        })
    }

    fn sorted_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.arms.keys().map(|tag| &**tag).collect();
        tags.sort_unstable();
        tags
    }
}

/// Handlers producing one result type `B`.
pub struct Cases<S: ?Sized, B> {
    table: Table<Arm<B>, Fallback<B>>,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType, B: 'static> Cases<S, B> {
    pub fn new() -> Self {
        Cases {
            table: Table::new(),
            _sum: PhantomData,
        }
    }

    /// Handles `tag`, receiving its payload.
    pub fn on<F>(mut self, tag: &str, handler: F) -> Self
    where
        F: Fn(&Value) -> B + Send + Sync + 'static,
    {
        self.table.insert(tag, arm(move |_, value| Ok(handler(value))));
        self
    }

    /// Handles `tag`, receiving its payload decoded as `T`.
    ///
    /// A payload that does not decode makes dispatch fail with
    /// [`SumError::Payload`].
    pub fn on_as<T, F>(mut self, tag: &str, handler: F) -> Self
    where
        T: DeserializeOwned + 'static,
        F: Fn(T) -> B + Send + Sync + 'static,
    {
        self.table.insert(
            tag,
            arm(move |tag, value| decode::<S, T>(tag, value).map(&handler)),
        );
        self
    }

    /// Handles `tag`, whose payload is a serialized member of the nested sum
    /// type `T`, with a matcher over `T`.
    pub fn on_member<T: SumType>(mut self, tag: &str, matcher: Matcher<T, B>) -> Self {
        self.table.insert(
            tag,
            arm(move |tag, value| {
                let inner: Member<T> = decode::<S, _>(tag, value)?;
                matcher.apply(&inner)
            }),
        );
        self
    }

    /// Handles every tag without an arm.
    pub fn wildcard<F>(mut self, handler: F) -> Self
    where
        F: Fn() -> B + Send + Sync + 'static,
    {
        self.table.set_wildcard(Box::new(handler));
        self
    }

    /// Builds the matcher without checking exhaustiveness.
    pub fn unchecked(self) -> Matcher<S, B> {
        Matcher::from_table(self.table)
    }

    pub(crate) fn into_table(self) -> Table<Arm<B>, Fallback<B>> {
        self.table
    }
}

impl<S: SumType, B: 'static> Default for Cases<S, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handlers whose result types are widened into the common type `B`.
///
/// Each arm may return its own `R` as long as `R: Into<B>`.
pub struct CasesW<S: ?Sized, B> {
    table: Table<Arm<B>, Fallback<B>>,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType, B: 'static> CasesW<S, B> {
    pub fn new() -> Self {
        CasesW {
            table: Table::new(),
            _sum: PhantomData,
        }
    }

    pub fn on<R, F>(mut self, tag: &str, handler: F) -> Self
    where
        R: Into<B> + 'static,
        F: Fn(&Value) -> R + Send + Sync + 'static,
    {
        self.table
            .insert(tag, arm(move |_, value| Ok(handler(value).into())));
        self
    }

    pub fn on_as<T, R, F>(mut self, tag: &str, handler: F) -> Self
    where
        T: DeserializeOwned + 'static,
        R: Into<B> + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        self.table.insert(
            tag,
            arm(move |tag, value| decode::<S, T>(tag, value).map(|payload| handler(payload).into())),
        );
        self
    }

    pub fn wildcard<R, F>(mut self, handler: F) -> Self
    where
        R: Into<B> + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.table.set_wildcard(Box::new(move || handler().into()));
        self
    }

    pub fn unchecked(self) -> Matcher<S, B> {
        Matcher::from_table(self.table)
    }

    pub(crate) fn into_table(self) -> Table<Arm<B>, Fallback<B>> {
        self.table
    }
}

impl<S: SumType, B: 'static> Default for CasesW<S, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Precomputed results, one per tag.
pub struct CasesX<S: ?Sized, B> {
    table: Table<B, B>,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType, B> CasesX<S, B> {
    pub fn new() -> Self {
        CasesX {
            table: Table::new(),
            _sum: PhantomData,
        }
    }

    pub fn on(mut self, tag: &str, value: B) -> Self {
        self.table.insert(tag, value);
        self
    }

    pub fn wildcard(mut self, value: B) -> Self {
        self.table.set_wildcard(value);
        self
    }

    pub fn unchecked(self) -> StrictMatcher<S, B> {
        StrictMatcher::from_table(self.table)
    }

    pub(crate) fn into_table(self) -> Table<B, B> {
        self.table
    }
}

impl<S: SumType, B> Default for CasesX<S, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Precomputed results widened into the common type `B`.
pub struct CasesXW<S: ?Sized, B> {
    table: Table<B, B>,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType, B> CasesXW<S, B> {
    pub fn new() -> Self {
        CasesXW {
            table: Table::new(),
            _sum: PhantomData,
        }
    }

    pub fn on(mut self, tag: &str, value: impl Into<B>) -> Self {
        self.table.insert(tag, value.into());
        self
    }

    pub fn wildcard(mut self, value: impl Into<B>) -> Self {
        self.table.set_wildcard(value.into());
        self
    }

    pub fn unchecked(self) -> StrictMatcher<S, B> {
        StrictMatcher::from_table(self.table)
    }

    pub(crate) fn into_table(self) -> Table<B, B> {
        self.table
    }
}

impl<S: SumType, B> Default for CasesXW<S, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches members of `S` to handlers.
pub struct Matcher<S: ?Sized, B> {
    table: Table<Arm<B>, Fallback<B>>,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType, B> Matcher<S, B> {
    fn from_table(table: Table<Arm<B>, Fallback<B>>) -> Self {
        Matcher {
            table,
            _sum: PhantomData,
        }
    }

    pub(crate) fn checked(table: Table<Arm<B>, Fallback<B>>) -> Result<Self> {
        table.checked::<S>().map(Self::from_table)
    }

    /// Runs the arm for the member's tag, or the wildcard.
    pub fn apply(&self, member: &Member<S>) -> Result<B> {
        let tag = member.tag();
        match self.table.select::<S>(tag)? {
            Selected::Arm(arm) => arm(tag, member.value()),
            Selected::Wildcard(wildcard) => Ok(wildcard()),
        }
    }

    /// Turns the matcher into a plain function, e.g. to use it inside the
    /// arms of another matcher.
    pub fn into_fn(self) -> impl Fn(&Member<S>) -> Result<B> + Send + Sync {
        move |member| self.apply(member)
    }
}

impl<S: SumType, B> fmt::Debug for Matcher<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("sum", &S::NAME)
            .field("arms", &self.table.sorted_tags())
            .field("wildcard", &self.table.wildcard.is_some())
            .finish()
    }
}

/// Looks up precomputed results for members of `S`.
pub struct StrictMatcher<S: ?Sized, B> {
    table: Table<B, B>,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType, B> StrictMatcher<S, B> {
    fn from_table(table: Table<B, B>) -> Self {
        StrictMatcher {
            table,
            _sum: PhantomData,
        }
    }

    pub(crate) fn checked(table: Table<B, B>) -> Result<Self> {
        table.checked::<S>().map(Self::from_table)
    }

    /// Returns the value stored for the member's tag, or the wildcard value.
    pub fn apply(&self, member: &Member<S>) -> Result<&B> {
        match self.table.select::<S>(member.tag())? {
            Selected::Arm(value) | Selected::Wildcard(value) => Ok(value),
        }
    }
}

impl<S: SumType, B: fmt::Debug> fmt::Debug for StrictMatcher<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrictMatcher")
            .field("sum", &S::NAME)
            .field("arms", &self.table.sorted_tags())
            .field("wildcard", &self.table.wildcard)
            .finish()
    }
}
