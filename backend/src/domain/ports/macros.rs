//! `define_port_error!` builds the error enum a port returns.
//!
//! Every variant carries named fields. The macro derives `thiserror::Error`
//! and adds one snake-case constructor per variant taking `impl Into<_>` for
//! each field, so adapters write
//! `CampgroundPersistenceError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ProbeError {
            Query { message: String } => "query failed: {message}",
            Missing { campground_id: String, attempts: u32 } =>
                "campground {campground_id} missing after {attempts} attempts",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ProbeError::query("timeout");
        assert_eq!(err, ProbeError::Query { message: "timeout".to_owned() });
        assert_eq!(err.to_string(), "query failed: timeout");
    }

    #[test]
    fn multi_field_variants_keep_field_types() {
        let err = ProbeError::missing("abc", 2_u32);
        assert_eq!(err.to_string(), "campground abc missing after 2 attempts");
    }
}
