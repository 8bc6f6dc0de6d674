//! The module dealing with the underlying representation of the [`Member`]
//! type.
//!
//! # Implementation details
//!
//! Every member of every sum type shares one shape: a [`Tag`] and a JSON
//! payload. Members without a payload hold [`Value::Null`], so the pair
//! `(tag, value)` is always complete and serialization never has to tell
//! "no payload" apart from "null payload".
//!
//! ```rust,no_run
//! # use serde_json::Value;
//! # use tagged_sum::Tag;
//! // For example only. The real fields are private.
//! struct RawMember {
//!     tag: Tag,
//!     value: Value,
//! }
//! ```
//!
//! The fields are not part of the public surface. Use
//! [`serialize`](crate::serialize) and [`deserialize`](crate::deserialize)
//! for storage; the raw object form returned by [`Member::to_raw`] is
//! unstable and only exists for [`is`](crate::is).

use core::{fmt, marker::PhantomData};

use serde_json::{Map, Value};

use crate::tag::{SumType, Tag};

/// Key of the tag in the raw object form.
pub const TAG_KEY: &str = "_tag";

/// Key of the payload in the raw object form.
pub const VALUE_KEY: &str = "_value";

/// A member of the sum type `S`: a declared tag and its payload.
///
/// Two members are equal iff their tags are equal and their payloads are
/// structurally equal.
pub struct Member<S: ?Sized> {
    tag: Tag,
    value: Value,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType> Member<S> {
    /// Caller guarantees `tag` is declared by `S`.
    pub(crate) fn new_unchecked(tag: Tag, value: Value) -> Self {
        Member {
            tag,
            value,
            _sum: PhantomData,
        }
    }

    /// The discriminant.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub(crate) fn value(&self) -> &Value {
        &self.value
    }

    /// The raw object form, `{"_tag": .., "_value": ..}`.
    ///
    /// This layout is unstable; persist members with
    /// [`serialize`](crate::serialize) instead.
    pub fn to_raw(&self) -> Value {
        let mut object = Map::with_capacity(2);
        object.insert(TAG_KEY.into(), Value::String(self.tag.as_str().into()));
        object.insert(VALUE_KEY.into(), self.value.clone());
        Value::Object(object)
    }
}

impl<S: ?Sized> Clone for Member<S> {
    fn clone(&self) -> Self {
        Member {
            tag: self.tag.clone(),
            value: self.value.clone(),
            _sum: PhantomData,
        }
    }
}

impl<S: ?Sized> PartialEq for Member<S> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.value == other.value
    }
}

impl<S: ?Sized> Eq for Member<S> {}

impl<S: SumType> fmt::Debug for Member<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}({})", S::NAME, self.tag, self.value)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    crate::sum_type!(Weather = Sun | Rain);

    fn member(tag: &str, value: Value) -> Member<Weather> {
        Member::new_unchecked(Tag::declared::<Weather>(tag).unwrap(), value)
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(member("Rain", json!(5)), member("Rain", json!(5)));
        assert_ne!(member("Rain", json!(5)), member("Rain", json!(6)));
        assert_ne!(member("Sun", Value::Null), member("Rain", json!(5)));
        assert_eq!(
            member("Rain", json!({"a": [1, 2]})),
            member("Rain", json!({"a": [1, 2]}))
        );
    }

    #[test]
    fn raw_form_has_both_keys() {
        assert_eq!(
            member("Sun", Value::Null).to_raw(),
            json!({"_tag": "Sun", "_value": null})
        );
    }

    #[test]
    fn debug_names_the_sum() {
        assert_eq!(format!("{:?}", member("Rain", json!(5))), "Weather::Rain(5)");
    }
}
