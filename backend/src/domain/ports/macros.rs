//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message, a snake_case constructor whose
//! parameters accept anything convertible into the field types, and an entry
//! in the generated `kind()` accessor used as a structured log field.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Variant name, stable across message wording changes.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) =>
                            stringify!($variant),
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SampleError {
            Closed => "link closed",
            Refused { host: String } => "link refused by {host}",
            Slow { host: String, elapsed_ms: u64 } => "link to {host} took {elapsed_ms} ms",
        }
    }

    #[test]
    fn unit_variant_constructor() {
        assert_eq!(SampleError::closed(), SampleError::Closed);
        assert_eq!(SampleError::closed().to_string(), "link closed");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SampleError::refused("db");
        assert_eq!(err.to_string(), "link refused by db");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SampleError::slow("db", 1500_u64);
        assert_eq!(err.to_string(), "link to db took 1500 ms");
    }

    #[test]
    fn kind_names_the_variant() {
        assert_eq!(SampleError::closed().kind(), "Closed");
        assert_eq!(SampleError::slow("db", 1_u64).kind(), "Slow");
    }
}
