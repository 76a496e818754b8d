//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing via `id.0 as usize`, but callers should prefer the
//! `.index()` helpers for clarity.
//!
//! Vertex indices double as semantic ids in the route graph: vertices
//! `[0, W)` are depots and `[W, W + O)` are targets.  `DepotId(i)` and
//! `TargetId(j)` are the 0-based positions within each group; the graph
//! converts between the two numbering schemes.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a vertex in the route graph (depots first, then targets).
    pub struct VertexId(u32);
}

typed_id! {
    /// 0-based index of a depot (warehouse).
    pub struct DepotId(u32);
}

typed_id! {
    /// 0-based index of a delivery target (oasis).
    pub struct TargetId(u32);
}

typed_id! {
    /// Unique courier id.  Assigned from a monotonically increasing counter
    /// owned by the courier arena; never reused.
    pub struct CourierId(u32);
}

typed_id! {
    /// Position of a courier type in the efficiency-ordered type catalog.
    pub struct CourierTypeId(u16);
}

typed_id! {
    /// Unique request id, assigned in scenario order.
    pub struct RequestId(u32);
}
