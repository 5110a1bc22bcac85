//! Per-resource WHOOP API services.
//!
//! Services are thin typed wrappers: they build a path, hand it to the
//! client's executor, and decode the JSON response. Rate limiting, retries,
//! and error classification all happen inside the executor.

mod cycle;
mod recovery;
mod sleep;
mod user;
mod workout;

pub use cycle::{Cycle, CycleScore, CycleService};
pub use recovery::{Recovery, RecoveryScore, RecoveryService};
pub use sleep::{Sleep, SleepNeeded, SleepScore, SleepService, StageSummary};
pub use user::{BasicProfile, BodyMeasurement, UserService};
pub use workout::{Workout, WorkoutScore, WorkoutService, ZoneDurations};
