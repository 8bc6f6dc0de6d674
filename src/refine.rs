//! Refinement of foreign values into sum type members.

use core::{fmt, marker::PhantomData};

use serde_json::Value;
use tracing::trace;

use crate::{
    sum::repr::{Member, TAG_KEY, VALUE_KEY},
    tag::{SumType, Tag},
};

/// Starts a refinement of foreign values into the member `tag` of `S`.
///
/// This is a low-level primitive working on the raw object form
/// `{"_tag": .., "_value": ..}`. For persisted data use
/// [`deserialize`](crate::deserialize).
///
/// # Examples
///
/// ```rust
/// use tagged_sum::{create, is, sum_type};
///
/// sum_type!(Weather = Sun | Rain);
///
/// let weather = create::<Weather>();
/// let rain = weather.mk().make("Rain", 123).unwrap();
///
/// let is_rain = is::<Weather>("Rain").with(|v| v.is_number());
/// assert!(is_rain.test(&rain.to_raw()));
/// assert!(!is_rain.test(&serde_json::json!("Rain")));
/// ```
pub fn is<S: SumType>(tag: &str) -> Is<S> {
    Is {
        tag: tag.into(),
        _sum: PhantomData,
    }
}

/// A refinement missing its payload predicate.
pub struct Is<S: ?Sized> {
    tag: Box<str>,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType> Is<S> {
    /// Completes the refinement with a predicate over the payload.
    pub fn with<P>(self, payload: P) -> Refinement<S, P>
    where
        P: Fn(&Value) -> bool,
    {
        Refinement {
            tag: self.tag,
            payload,
            _sum: PhantomData,
        }
    }
}

/// Checks whether a foreign value is the member `tag` of `S` with a payload
/// accepted by `P`.
pub struct Refinement<S: ?Sized, P> {
    tag: Box<str>,
    payload: P,
    _sum: PhantomData<fn() -> S>,
}

impl<S: SumType, P> Refinement<S, P>
where
    P: Fn(&Value) -> bool,
{
    /// Whether `foreign` refines to the member.
    ///
    /// The checks run in order: the tag is declared by `S`; `foreign` is an
    /// object; it owns `_tag` equal to the tag; it owns `_value` and the
    /// predicate accepts it. Other keys are ignored. Never fails.
    pub fn test(&self, foreign: &Value) -> bool {
        self.payload_of(foreign).is_some()
    }

    /// Like [`test`](Self::test), returning the refined member.
    pub fn narrow(&self, foreign: &Value) -> Option<Member<S>> {
        let value = self.payload_of(foreign)?;
        let tag = Tag::new(&*self.tag).ok()?;
        Some(Member::new_unchecked(tag, value.clone()))
    }

    fn payload_of<'v>(&self, foreign: &'v Value) -> Option<&'v Value> {
        if !S::MEMBERS.contains(&self.tag) {
            trace!(sum = S::NAME, tag = %self.tag, "refinement rejected: undeclared tag");
            return None;
        }
        let Value::Object(object) = foreign else {
            trace!(sum = S::NAME, tag = %self.tag, "refinement rejected: not an object");
            return None;
        };
        match object.get(TAG_KEY) {
            Some(Value::String(tag)) if *tag == *self.tag => {}
            _ => {
                trace!(sum = S::NAME, tag = %self.tag, "refinement rejected: tag mismatch");
                return None;
            }
        }
        match object.get(VALUE_KEY) {
            Some(value) if (self.payload)(value) => Some(value),
            _ => {
                trace!(sum = S::NAME, tag = %self.tag, "refinement rejected: payload");
                None
            }
        }
    }
}

impl<S: SumType, P> fmt::Debug for Refinement<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("sum", &S::NAME)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::create;

    crate::sum_type!(T = Foo | Bar | Baz);
    crate::sum_type!(U = NotFoo | Foo);

    fn is_null(v: &Value) -> bool {
        v.is_null()
    }

    #[test]
    fn accepts_according_to_the_predicate() {
        let t = create::<T>();

        let foo = t.mk().get("Foo").unwrap().unit();
        assert!(is::<T>("Foo").with(is_null).test(&foo.to_raw()));

        let bar = t.mk().make("Bar", "ciao").unwrap();
        assert!(is::<T>("Bar").with(Value::is_string).test(&bar.to_raw()));

        let baz = t.mk().make("Baz", vec![1, 2, 3]).unwrap();
        let numbers = |v: &Value| {
            v.as_array()
                .is_some_and(|xs| xs.iter().all(Value::is_number))
        };
        assert!(is::<T>("Baz").with(numbers).test(&baz.to_raw()));
    }

    #[test]
    fn fails_if_the_predicate_fails() {
        let foo = create::<T>().mk().get("Foo").unwrap().unit();
        assert!(!is::<T>("Foo").with(|_| false).test(&foo.to_raw()));
    }

    #[test]
    fn fails_bad_input_key() {
        let foo = create::<T>().mk().get("Foo").unwrap().unit();
        assert!(!is::<T>("Food").with(is_null).test(&foo.to_raw()));
    }

    #[rstest]
    #[case(Value::Null)]
    #[case(json!("Foo"))]
    #[case(json!(1))]
    #[case(json!(true))]
    #[case(json!(["Foo", null]))]
    #[case(json!({"Foo": "Foo"}))]
    #[case(json!({"_tag": "Foo"}))]
    #[case(json!({"_value": null}))]
    #[case(json!({"_tag": ["Foo"], "_value": null}))]
    fn fails_wholly_bad_data(#[case] foreign: Value) {
        let refinement = is::<T>("Foo").with(is_null);
        assert!(!refinement.test(&foreign));
        assert!(refinement.narrow(&foreign).is_none());
    }

    #[test]
    fn fails_bad_parsed_key() {
        let not_foo = create::<U>().mk().get("NotFoo").unwrap().unit();
        assert!(!is::<T>("Foo").with(is_null).test(&not_foo.to_raw()));
    }

    #[test]
    fn fails_bad_parsed_value() {
        let foo = create::<U>().mk().make("Foo", "not null").unwrap();
        assert!(!is::<T>("Foo").with(is_null).test(&foo.to_raw()));
    }

    #[test]
    fn tolerates_excess_properties() {
        let mut foreign = create::<T>().mk().get("Foo").unwrap().unit().to_raw();
        foreign["excess"] = json!(true);

        let refinement = is::<T>("Foo").with(is_null);
        assert!(refinement.test(&foreign));
        assert_eq!(
            refinement.narrow(&foreign),
            Some(create::<T>().mk().get("Foo").unwrap().unit())
        );
    }
}
