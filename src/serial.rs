//! The canonical `(tag, value)` form of sum type members.
//!
//! This is the form to persist or send across processes. It is isomorphic to
//! the member itself: `deserialize(&sum)(serialize(&x)) == Ok(x)`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{
    error::Result,
    sum::{mk::Constructor, repr::Member, Sum},
    tag::{SumType, Tag},
};

/// A member as a pair of its tag and its payload (`null` when nullary).
///
/// Serde encodes it as a two-element sequence, `["Rain", 5]` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Serialized(pub Tag, pub Value);

impl Serialized {
    pub fn tag(&self) -> &Tag {
        &self.0
    }

    pub fn value(&self) -> &Value {
        &self.1
    }
}

impl From<Serialized> for (Tag, Value) {
    fn from(pair: Serialized) -> Self {
        (pair.0, pair.1)
    }
}

impl From<(Tag, Value)> for Serialized {
    fn from((tag, value): (Tag, Value)) -> Self {
        Serialized(tag, value)
    }
}

/// Serializes a member into its tag and its payload.
///
/// # Examples
///
/// ```rust
/// use serde_json::Value;
/// use tagged_sum::{create, serialize, sum_type};
///
/// sum_type!(Weather = Sun | Rain);
///
/// let weather = create::<Weather>();
/// let sun = weather.mk().get("Sun").unwrap().unit();
/// let pair = serialize(&sun);
/// assert_eq!(pair.tag().as_str(), "Sun");
/// assert_eq!(pair.value(), &Value::Null);
/// ```
pub fn serialize<S: SumType>(member: &Member<S>) -> Serialized {
    Serialized(member.tag().clone(), member.value().clone())
}

/// Deserializes a pair through the constructors of `sum`.
///
/// The tag must be declared by `S`; the payload is taken as is.
///
/// # Examples
///
/// ```rust
/// use tagged_sum::{create, deserialize, serialize, sum_type};
///
/// sum_type!(Weather = Sun | Rain);
///
/// let weather = create::<Weather>();
/// let rain = weather.mk().make("Rain", 123).unwrap();
/// assert_eq!(deserialize(&weather)(serialize(&rain)).unwrap(), rain);
/// ```
pub fn deserialize<S: SumType>(sum: &Sum<S>) -> impl Fn(Serialized) -> Result<Member<S>> + '_ {
    move |Serialized(tag, value)| Ok(sum.mk().get(&tag)?.call(value))
}

impl<S: SumType> Serialize for Member<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        (self.tag(), self.value()).serialize(serializer)
    }
}

impl<'de, S: SumType> Deserialize<'de> for Member<S> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Serialized(tag, value) = Serialized::deserialize(deserializer)?;
        let constructor = Constructor::<S>::new(&tag).map_err(serde::de::Error::custom)?;
        Ok(constructor.call(value))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{create, error::SumError};

    crate::sum_type!(Weather = Sun | Rain | Snow);

    #[test]
    fn nullary_members_serialize_to_null() {
        let weather = create::<Weather>();
        let sun = weather.mk().get("Sun").unwrap().unit();

        assert_eq!(serialize(&sun), Serialized(Tag::new("Sun").unwrap(), Value::Null));
        assert_eq!(serde_json::to_value(serialize(&sun)).unwrap(), json!(["Sun", null]));
    }

    #[test]
    fn deserialized_members_round_trip() {
        let weather = create::<Weather>();
        let from_pair = deserialize(&weather);

        let sun = weather.mk().get("Sun").unwrap().unit();
        assert_eq!(from_pair(serialize(&sun)).unwrap(), sun);

        let rain = weather.mk().make("Rain", 123).unwrap();
        assert_eq!(from_pair(serialize(&rain)).unwrap(), rain);
    }

    #[test]
    fn deserialize_rejects_undeclared_tags() {
        let weather = create::<Weather>();
        let pair = Serialized(Tag::new("Hail").unwrap(), json!(1));

        assert!(matches!(
            deserialize(&weather)(pair),
            Err(SumError::UnknownTag { ref tag, .. }) if tag == "Hail"
        ));
        assert!(weather.mk().is_empty());
    }

    #[test]
    fn members_use_the_pair_with_serde() {
        let weather = create::<Weather>();
        let rain = weather.mk().make("Rain", json!({"mm": 5})).unwrap();

        let text = serde_json::to_string(&rain).unwrap();
        assert_eq!(text, r#"["Rain",{"mm":5}]"#);
        assert_eq!(serde_json::from_str::<Member<Weather>>(&text).unwrap(), rain);

        let err = serde_json::from_str::<Member<Weather>>(r#"["Hail",1]"#).unwrap_err();
        assert!(err.to_string().contains("Hail"));
        assert!(serde_json::from_str::<Member<Weather>>(r#"["",1]"#).is_err());
        assert!(serde_json::from_str::<Member<Weather>>(r#"{"_tag":"Rain","_value":1}"#).is_err());
    }

    #[test]
    fn floats_read_back_exactly() {
        let weather = create::<Weather>();
        for mm in [1.0715660391465826e-75, 0.1 + 0.2, f64::MIN_POSITIVE, f64::MAX, -2.5e-308] {
            let rain = weather.mk().make("Rain", mm).unwrap();
            let text = serde_json::to_string(&rain).unwrap();
            let back = serde_json::from_str::<Member<Weather>>(&text).unwrap();
            assert_eq!(back, rain, "{text}");
        }
    }
}
