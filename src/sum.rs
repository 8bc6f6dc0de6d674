//! The [`Sum`] bundle: constructors and matchers scoped to one sum type.

use core::fmt;

pub mod mk;
pub mod repr;

use self::mk::Constructors;
use crate::{
    error::Result,
    pat::{Cases, CasesW, CasesX, CasesXW, Matcher, StrictMatcher},
    tag::SumType,
};

/// Constructors and pattern matching for the sum type `S`.
///
/// Built by [`create`](crate::create). The bundle owns the constructor
/// cache, so constructors are reference-stable for as long as it lives.
pub struct Sum<S: ?Sized> {
    mk: Constructors<S>,
}

impl<S: SumType> Sum<S> {
    pub(crate) fn new() -> Self {
        Sum {
            mk: Constructors::new(),
        }
    }

    /// The constructors of the sum type's members.
    pub fn mk(&self) -> &Constructors<S> {
        &self.mk
    }

    /// Pattern match against each member. Every member must be covered
    /// unless a wildcard is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagged_sum::{create, sum_type, Cases};
    ///
    /// sum_type!(Weather = Sun | Rain | Overcast);
    ///
    /// let weather = create::<Weather>();
    /// let rainfall = weather
    ///     .matcher(
    ///         Cases::new()
    ///             .on("Rain", |n| format!("{n}mm"))
    ///             .wildcard(|| "not rain".to_string()),
    ///     )
    ///     .unwrap();
    ///
    /// let rain = weather.mk().make("Rain", 5).unwrap();
    /// let sun = weather.mk().get("Sun").unwrap().unit();
    /// assert_eq!(rainfall.apply(&rain).unwrap(), "5mm");
    /// assert_eq!(rainfall.apply(&sun).unwrap(), "not rain");
    /// ```
    pub fn matcher<B: 'static>(&self, cases: Cases<S, B>) -> Result<Matcher<S, B>> {
        Matcher::checked(cases.into_table())
    }

    /// Like [`matcher`](Self::matcher), but every arm may return its own type
    /// as long as it converts into the common type `B` ("widen").
    pub fn matcher_w<B: 'static>(&self, cases: CasesW<S, B>) -> Result<Matcher<S, B>> {
        Matcher::checked(cases.into_table())
    }

    /// Pattern match with precomputed values instead of handlers ("strict").
    pub fn matcher_x<B>(&self, cases: CasesX<S, B>) -> Result<StrictMatcher<S, B>> {
        StrictMatcher::checked(cases.into_table())
    }

    /// Strict matching where every value converts into the common type `B`.
    pub fn matcher_xw<B>(&self, cases: CasesXW<S, B>) -> Result<StrictMatcher<S, B>> {
        StrictMatcher::checked(cases.into_table())
    }
}

impl<S: SumType> fmt::Debug for Sum<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sum").field("mk", &self.mk).finish()
    }
}
