//! Test utilities for the tracking crate.
//!
//! Shared by unit tests in `src/` and by integration tests in `tests/`
//! through the `test-support` feature.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::CheckpointId;
use crate::domain::ports::CheckpointIdGenerator;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Checkpoint ids `cp-1`, `cp-2`, ... in call order.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator(AtomicU64);

impl CheckpointIdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> CheckpointId {
        let next = self.0.fetch_add(1, Ordering::Relaxed) + 1;
        match CheckpointId::new(format!("cp-{next}")) {
            Ok(id) => id,
            Err(error) => panic!("sequential checkpoint id rejected: {error}"),
        }
    }
}
