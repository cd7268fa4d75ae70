//! Outbound adapters implementing the driven ports.
//!
//! - **memory**: process-local store backing the checkpoint and unit ports.

pub mod memory;
