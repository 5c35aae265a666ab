//! Strongly typed graph handles.
//!
//! Handles are dense indices assigned in insertion order by the graph store,
//! so they double as `Vec` positions.  They are `Copy + Ord + Hash` so search
//! state can key maps on them and frontiers can break ties on them.

use std::fmt;

/// Generate a typed handle around a `u32` index.
macro_rules! graph_handle {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Position of the element in its owning `Vec`.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        /// Fails if `index` does not fit in a `u32`.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            #[inline]
            fn try_from(index: usize) -> Result<$name, Self::Error> {
                u32::try_from(index).map($name)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

graph_handle! {
    /// Handle of an intersection in a road graph.
    pub struct NodeId, "n";
}

graph_handle! {
    /// Handle of a directed road segment in a road graph.
    pub struct EdgeId, "e";
}
