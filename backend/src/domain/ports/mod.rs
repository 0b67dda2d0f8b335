//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`ExerciseTracker`]) are what inbound adapters call; driven
//! ports ([`UserRecordStore`]) are what outbound adapters implement. Each
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_tracker;
mod user_record_store;

#[cfg(test)]
pub use exercise_tracker::MockExerciseTracker;
pub use exercise_tracker::{ExerciseTracker, NewExerciseRequest};
#[cfg(test)]
pub use user_record_store::MockUserRecordStore;
pub use user_record_store::{RecordStoreError, UserRecordStore};
