//! Strongly-typed ID newtypes for domain entities.
//!
//! The school backend uses opaque string identifiers (document ids). This
//! module wraps them in one newtype per entity so a `ClassId` can never be
//! passed where a `StudentId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use schoolday_models::ids::{ClassId, StudentId};
//!
//! fn timetable_for(class: &ClassId) { /* ... */ }
//!
//! let class_id = ClassId::new("6650f1c2a1");
//! timetable_for(&class_id);     // OK
//! // timetable_for(&StudentId::new("x")); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;

/// Macro to define a strongly-typed ID newtype around `String`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner String.
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Check if the identifier is blank.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }
    };
}

define_id!(
    /// Identifier of a parent account.
    ParentId
);

define_id!(
    /// Identifier of a student.
    StudentId
);

define_id!(
    /// Identifier of a class (homeroom).
    ClassId
);

define_id!(
    /// Identifier of a school.
    SchoolId
);

define_id!(
    /// Identifier of a school year.
    SchoolYearId
);

define_id!(
    /// Identifier of a period definition.
    PeriodId
);

define_id!(
    /// Identifier of a timetable entry.
    EntryId
);

define_id!(
    /// Identifier of a subject.
    SubjectId
);

define_id!(
    /// Identifier of a teacher.
    TeacherId
);

define_id!(
    /// Identifier of an attendance record, leave request or communication entry.
    RecordId
);

/// Pick the first non-blank identifier out of the `id` / `_id` pair upstream sends.
pub fn first_id<T: From<String>>(id: Option<String>, mongo_id: Option<String>) -> Option<T> {
    id.into_iter()
        .chain(mongo_id)
        .find(|s| !s.trim().is_empty())
        .map(T::from)
}
