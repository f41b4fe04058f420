//! Macro for wire-level string enums
//!
//! Several parameters travel as short lowercase strings (`"https"`, `"tcp"`).
//! This macro gives such an enum a single mapping that drives `Display`,
//! case-insensitive `FromStr` and string-based serde in both directions.
//!
//! # Example
//!
//! ```rust
//! use gttx_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Transport {
//!     Tcp,
//!     Udp,
//! }
//!
//! impl_wire_enum_conversions!(Transport {
//!     Tcp => "tcp",
//!     Udp => "udp",
//! });
//!
//! assert_eq!("TCP".parse::<Transport>().unwrap(), Transport::Tcp);
//! assert_eq!(Transport::Udp.to_string(), "udp");
//! ```

/// Implements `Display`, `FromStr`, `Serialize` and `Deserialize` for a
/// fieldless enum from a `Variant => "wire"` table.
///
/// Parsing is case-insensitive; output is always the wire string as written.
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this variant
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }

        impl ::serde::Serialize for $enum_name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $enum_name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let raw = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}
