/// Defines a newtype record identifier around an `i64` and generates:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)
/// - `Display`
/// - `FIRST` and `next()` for monotonic id counters
///
/// Usage:
///   define_record_id!(PatientId);
#[macro_export]
macro_rules! define_record_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl $name {
            /// First id handed out by a fresh collection.
            pub const FIRST: $name = $name(1);

            pub fn new(value: i64) -> Self {
                $name(value)
            }

            /// The id following this one in allocation order.
            pub fn next(self) -> Self {
                $name(self.0 + 1)
            }
        }
    };
}
