//! Strongly-typed identifiers.
//!
//! Every entity gets its own identifier type so that a teacher id can never be
//! passed where a subject id is expected.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the raw identifier value.
            pub fn value(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Shift`](super::Shift).
    ShiftId
);
entity_id!(
    /// Identifier of a persisted [`ClassPeriod`](super::ClassPeriod).
    ClassPeriodId
);
entity_id!(
    /// Identifier of a [`Teacher`](super::Teacher).
    TeacherId
);
entity_id!(
    /// Identifier of a [`Subject`](super::Subject).
    SubjectId
);
entity_id!(
    /// Identifier of a [`ClassGroup`](super::ClassGroup).
    ClassGroupId
);
entity_id!(
    /// Identifier of a persisted [`TimetableEntry`](super::TimetableEntry).
    TimetableEntryId
);
