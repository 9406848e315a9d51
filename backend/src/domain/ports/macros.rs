//! `define_port_error!`: thiserror enums for driven-port failures.
//!
//! Each variant gets a snake_case constructor taking `impl Into<_>` per
//! field, and the enum gets `variant_name()` for structured logging.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };
    (@ctor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[must_use]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };
    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),+ }) => { Self::$variant { .. } };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: $ty),+ } )?,
            )+
        }

        impl $name {
            $(define_port_error!(@ctor $variant $( { $($field : $ty),+ } )?);)+

            /// Variant name, for log fields.
            #[must_use]
            pub const fn variant_name(&self) -> &'static str {
                match self {
                    $(define_port_error!(@pattern $variant $( { $($field : $ty),+ } )?) => stringify!($variant),)+
                }
            }
        }
    };
}

pub(crate) use define_port_error;
