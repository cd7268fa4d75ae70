//! Checkpoint status enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle stage a unit reaches at a checkpoint.
///
/// The wire form is the upper snake case name, e.g. `IN_TRANSIT`.
///
/// # Examples
/// ```
/// use tracking::domain::CheckpointStatus;
///
/// let status: CheckpointStatus = "OUT_FOR_DELIVERY".parse().expect("known status");
/// assert_eq!(status, CheckpointStatus::OutForDelivery);
/// assert_eq!(status.to_string(), "OUT_FOR_DELIVERY");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckpointStatus {
    #[default]
    Created,
    PickedUp,
    InTransit,
    AtFacility,
    OutForDelivery,
    Delivered,
    Exception,
}

impl CheckpointStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Created,
        Self::PickedUp,
        Self::InTransit,
        Self::AtFacility,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Exception,
    ];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::PickedUp => "PICKED_UP",
            Self::InTransit => "IN_TRANSIT",
            Self::AtFacility => "AT_FACILITY",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Exception => "EXCEPTION",
        }
    }
}

impl fmt::Display for CheckpointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known checkpoint status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCheckpointStatusError {
    value: String,
}

impl ParseCheckpointStatusError {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl fmt::Display for ParseCheckpointStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid checkpoint status: {}", self.value)
    }
}

impl std::error::Error for ParseCheckpointStatusError {}

impl FromStr for CheckpointStatus {
    type Err = ParseCheckpointStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseCheckpointStatusError {
                value: value.to_owned(),
            })
    }
}
