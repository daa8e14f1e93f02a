//! Package format version lines and the gates that depend on them.
//!
//! Two independent, monotonically increasing counters govern the layout of a
//! package: the UE4 line ([`ObjectVersion`]) and the UE5 line
//! ([`ObjectVersionUe5`]). Every conditional field is declared once in
//! [`Gate`] together with the version that introduced it, and evaluated by
//! [`Gate::is_open`].

/// Declares a contiguous, ordered version enumeration.
///
/// The first variant carries the starting ordinal; each following variant is
/// one greater than its predecessor.
macro_rules! version_line {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $first:ident = $start:literal,
            $($variant:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
        #[repr(i32)]
        $vis enum $name {
            $first = $start,
            $($variant),*
        }

        impl $name {
            /// Every version of this line, oldest first
            pub const ALL: &'static [$name] = &[$name::$first, $($name::$variant),*];

            /// The oldest version of this line
            pub const OLDEST: $name = $name::$first;

            /// The newest version this crate knows how to decode
            pub const LATEST: $name = Self::ALL[Self::ALL.len() - 1];

            /// The serialized ordinal
            pub const fn raw(self) -> i32 {
                self as i32
            }

            /// Looks up the version with the given serialized ordinal
            pub fn from_raw(raw: i32) -> Option<Self> {
                let index = usize::try_from(raw.checked_sub($start)?).ok()?;
                Self::ALL.get(index).copied()
            }

            /// Variant name, for diagnostics
            pub fn name(self) -> &'static str {
                match self {
                    $name::$first => stringify!($first),
                    $($name::$variant => stringify!($variant)),*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} ({})", self.name(), self.raw())
            }
        }
    };
}

mod gate;
mod ue4;
mod ue5;

pub use gate::{Gate, Threshold};
pub use ue4::ObjectVersion;
pub use ue5::ObjectVersionUe5;
