//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for backend-assigned identifiers. The backend
//! treats all of these as opaque strings; the wrappers only guarantee
//! non-emptiness at construction time so downstream code never has to
//! re-check.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::PublishError;

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident, $label:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, rejecting blank input
            pub fn new(value: impl Into<String>) -> Result<Self, PublishError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(PublishError::Validation(format!(
                        "{} must not be empty.",
                        $label
                    )));
                }
                Ok(Self(value))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = PublishError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

opaque_id!(
    /// Identifier assigned by the backend when note metadata is created.
    /// Its presence gates the cover and content upload steps.
    NoteId,
    "Note ID"
);

opaque_id!(
    /// Identifier of the niche (category) a note is published under
    NicheId,
    "Niche ID"
);

opaque_id!(
    /// Optional identifier linking a note to a course
    CourseId,
    "Course ID"
);

opaque_id!(
    /// Storage object key issued alongside a presigned upload URL
    FileKey,
    "File key"
);
