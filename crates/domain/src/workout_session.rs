use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use derive_more::{AsRef, Display};
use uuid::Uuid;

use crate::ExerciseID;

#[derive(AsRef, Debug, Default, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutSessionID(String);

impl WorkoutSessionID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<String> for WorkoutSessionID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutSessionID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for WorkoutSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()).to_string())
    }
}

/// One visit to the gym.
///
/// A session without an end time is active. At most one session is active at
/// any time, which is the caller's responsibility to uphold. `exercise_ids`
/// keeps the order in which exercises were added to the session and is the
/// authoritative source for per-category ordering. Ids of deleted exercises
/// may linger in `exercise_ids` and are filtered out at read time.
///
/// A dwarf workout is a short session without any per-exercise set logging.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: WorkoutSessionID,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub exercise_ids: Vec<ExerciseID>,
    pub is_dwarf_workout: bool,
}

impl WorkoutSession {
    #[must_use]
    pub fn start(dwarf: bool) -> Self {
        Self {
            id: WorkoutSessionID::new(),
            start_time: Utc::now(),
            end_time: None,
            exercise_ids: vec![],
            is_dwarf_workout: dwarf,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.start_time.with_timezone(&Local).date_naive()
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end_time| end_time - self.start_time)
    }
}
