//! Helper macro generating port error enums.
//!
//! Each variant carries named fields and a display template. The macro
//! derives `thiserror::Error` and emits one snake-case constructor per
//! variant whose parameters accept anything convertible into the field type,
//! so adapters can write `DatasourceError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = "Construct the `" $variant "` variant."]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;
