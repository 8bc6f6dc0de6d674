/// Declares a sum type: an uninhabited marker type implementing
/// [`SumType`](crate::SumType).
///
/// Tags are listed as identifiers separated by `|`, as string literals in
/// brackets (for tags that are not valid identifiers), or as `*` for an open
/// sum accepting every non-empty tag.
///
/// # Examples
///
/// ```rust
/// use tagged_sum::{sum_type, Members, SumType};
///
/// sum_type! {
///     /// Today's weather.
///     pub Weather = Sun | Rain | Overcast;
/// }
///
/// sum_type!(Reserved = ["constructor", "__proto__", "_"]);
/// sum_type!(Anything = *);
///
/// assert_eq!(Weather::NAME, "Weather");
/// assert_eq!(Weather::MEMBERS, Members::Closed(&["Sun", "Rain", "Overcast"]));
/// assert!(Reserved::MEMBERS.contains("__proto__"));
/// assert_eq!(Anything::MEMBERS, Members::Open);
/// ```
#[macro_export]
macro_rules! sum_type {
    ($(#[$meta:meta])* $vis:vis $name:ident = * $(;)?) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis enum $name {}

        impl $crate::SumType for $name {
            const NAME: &'static str = ::core::stringify!($name);
            const MEMBERS: $crate::Members = $crate::Members::Open;
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident = [$($tag:literal),+ $(,)?] $(;)?) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis enum $name {}

        impl $crate::SumType for $name {
            const NAME: &'static str = ::core::stringify!($name);
            const MEMBERS: $crate::Members = $crate::Members::Closed(&[$($tag),+]);
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident = $($tag:ident)|+ $(;)?) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis enum $name {}

        impl $crate::SumType for $name {
            const NAME: &'static str = ::core::stringify!($name);
            const MEMBERS: $crate::Members =
                $crate::Members::Closed(&[$(::core::stringify!($tag)),+]);
        }
    };
}
