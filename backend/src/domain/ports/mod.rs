//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`CheckpointCommand`], [`TrackingQuery`]) are what inbound
//! adapters call. Driven ports ([`CheckpointRepository`], [`UnitRepository`],
//! [`CheckpointLedger`], [`CheckpointIdGenerator`]) are what the services need
//! from storage and the environment.

mod macros;
pub(crate) use macros::define_port_error;

mod checkpoint_command;
mod checkpoint_id_generator;
mod checkpoint_ledger;
mod checkpoint_repository;
mod tracking_query;
mod unit_repository;

#[cfg(test)]
pub use checkpoint_command::MockCheckpointCommand;
pub use checkpoint_command::{
    CheckpointCommand, CheckpointPayload, FixtureCheckpointCommand, RegisterCheckpointRequest,
};
#[cfg(test)]
pub use checkpoint_id_generator::MockCheckpointIdGenerator;
pub use checkpoint_id_generator::{CheckpointIdGenerator, UuidCheckpointIdGenerator};
#[cfg(test)]
pub use checkpoint_ledger::MockCheckpointLedger;
pub use checkpoint_ledger::{
    CheckpointLedger, CheckpointLedgerError, LedgerAppend, SequentialCheckpointLedger,
};
#[cfg(test)]
pub use checkpoint_repository::MockCheckpointRepository;
pub use checkpoint_repository::{CheckpointRepository, CheckpointRepositoryError};
#[cfg(test)]
pub use tracking_query::MockTrackingQuery;
pub use tracking_query::{
    FixtureTrackingQuery, GetTrackingHistoryRequest, ListUnitsByStatusRequest,
    ListUnitsByStatusResponse, TrackingHistoryResponse, TrackingQuery, UnitPayload,
};
#[cfg(test)]
pub use unit_repository::MockUnitRepository;
pub use unit_repository::{UnitRepository, UnitRepositoryError};
