// impl_value_from_int
// integers of every width collapse into `Value::Int`
macro_rules! impl_value_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for $crate::value::Value {
                fn from(v: $ty) -> Self {
                    Self::Int(i128::from(v))
                }
            }
        )*
    };
}

// entity_accessors
/// Implement `EntityAccessor` for a struct by mapping accessor names to fields.
///
/// ```ignore
/// entity_accessors!(Contact {
///     "getId" => id,
///     "getEmail" => email,
/// });
/// ```
#[macro_export]
macro_rules! entity_accessors {
    ($ty:ty { $($accessor:literal => $field:ident),* $(,)? }) => {
        impl $crate::traits::EntityAccessor for $ty {
            fn call_accessor(&self, accessor: &str) -> Option<$crate::value::Value> {
                match accessor {
                    $( $accessor => Some($crate::value::Value::from(self.$field.clone())), )*
                    _ => None,
                }
            }
        }
    };
}
