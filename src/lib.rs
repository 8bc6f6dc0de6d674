#![doc = include_str!("../README.md")]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]
#![deny(rust_2024_compatibility)]

mod macros;

pub mod error;
pub mod pat;
pub mod refine;
pub mod serial;
pub mod sum;
pub mod tag;

pub use self::{
    error::{Result, SumError},
    pat::{Cases, CasesW, CasesX, CasesXW, Matcher, StrictMatcher},
    refine::{is, Is, Refinement},
    serial::{deserialize, serialize, Serialized},
    sum::{
        mk::{Constructor, Constructors},
        repr::Member,
        Sum,
    },
    tag::{Members, SumType, Tag},
};

/// Creates the constructors and matchers of the sum type `S`.
///
/// Each call returns a fresh bundle with its own constructor cache.
///
/// # Examples
///
/// ```rust
/// use tagged_sum::{create, sum_type};
///
/// sum_type!(Weather = Sun | Rain);
///
/// let weather = create::<Weather>();
/// let rain = weather.mk().get("Rain").unwrap();
/// assert_eq!(rain.call(5), weather.mk().make("Rain", 5).unwrap());
/// ```
pub fn create<S: SumType>() -> Sum<S> {
    Sum::new()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    crate::sum_type! {
        /// Clouds carry a description, rain its depth in millimetres.
        Weather = Rain | Sun | Overcast
    }

    #[test]
    fn basic() {
        let weather = create::<Weather>();
        let rain = weather.mk().get("Rain").unwrap();
        let sun = weather.mk().get("Sun").unwrap();

        let rainfall = weather
            .matcher(
                Cases::new()
                    .on("Rain", |n| format!("{n}mm"))
                    .wildcard(|| "not rain".to_owned()),
            )
            .unwrap();
        assert_eq!(rainfall.apply(&rain.call(5)).unwrap(), "5mm");
        assert_eq!(rainfall.apply(&sun.unit()).unwrap(), "not rain");

        let pair = serialize(&sun.unit());
        assert_eq!(pair, Serialized(Tag::new("Sun").unwrap(), Value::Null));
        assert_eq!(deserialize(&weather)(pair).unwrap(), sun.unit());

        assert!(is::<Weather>("Rain")
            .with(Value::is_number)
            .test(&rain.call(json!(5)).to_raw()));
    }

    #[test]
    fn bundles_do_not_share_constructors() {
        let a = create::<Weather>();
        let b = create::<Weather>();

        assert_eq!(a.mk().get("Sun").unwrap(), a.mk().get("Sun").unwrap());
        assert_ne!(a.mk().get("Sun").unwrap(), b.mk().get("Sun").unwrap());
        assert_eq!(a.mk().make("Rain", 1).unwrap(), b.mk().make("Rain", 1).unwrap());
    }
}
