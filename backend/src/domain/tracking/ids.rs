//! Identifier newtypes for units, tracking numbers and checkpoints.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TrackingValidationError;

macro_rules! string_identifier {
    (
        $(#[$meta:meta])*
        $name:ident => $empty:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, TrackingValidationError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            fn from_owned(id: String) -> Result<Self, TrackingValidationError> {
                if id.trim().is_empty() {
                    return Err(TrackingValidationError::$empty);
                }
                Ok(Self(id))
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TrackingValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }
    };
}

string_identifier! {
    /// Identifier of a provisioned unit, e.g. `UNIT001`.
    UnitId => EmptyUnitId
}

string_identifier! {
    /// Customer-facing tracking number paired 1:1 with a unit.
    TrackingId => EmptyTrackingId
}

string_identifier! {
    /// Opaque identifier assigned to a checkpoint on registration.
    CheckpointId => EmptyCheckpointId
}

impl CheckpointId {
    /// Generate a random UUID-backed identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
