//! Helper macro for declaring repository port error enums.
//!
//! `define_port_error!` expands a compact variant list into a `thiserror`
//! enum with one snake_case constructor per variant (string fields accept
//! `impl Into<String>`) and a `kind()` accessor used as a stable label in
//! log events.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_fields $variant [] [] $( $field : $ty, )*);
    };

    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*]) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_fields $variant:ident [$($params:tt)*] [$($inits:tt)*] $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_fields
            $variant
            [$($params)* $field: impl Into<$ty>,]
            [$($inits)* $field: $field.into(),]
            $($rest)*
        );
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

            /// Variant name in snake_case, for log fields.
            pub fn kind(&self) -> &'static str {
                ::paste::paste! {
                    match self {
                        $(
                            define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) =>
                                stringify!([<$variant:snake>]),
                        )*
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePortError {
            Offline => "store offline",
            Query { message: String } => "query failed: {message}",
            Duplicate { column: String, attempts: u32 } => "duplicate {column} after {attempts} tries",
        }
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = SamplePortError::query("syntax error");
        assert_eq!(err.to_string(), "query failed: syntax error");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::duplicate("email", 2_u32);
        assert_eq!(err.to_string(), "duplicate email after 2 tries");
    }

    #[rstest]
    #[case(SamplePortError::offline(), "offline")]
    #[case(SamplePortError::query("x"), "query")]
    #[case(SamplePortError::duplicate("email", 1_u32), "duplicate")]
    fn kind_is_snake_case_variant_name(#[case] err: SamplePortError, #[case] expected: &str) {
        assert_eq!(err.kind(), expected);
    }
}
