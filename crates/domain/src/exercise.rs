use chrono::{DateTime, Local, NaiveDate, Utc};
use derive_more::{AsRef, Display, Into};
use uuid::Uuid;

use crate::{Category, CategoryError, Name, NameError};

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if value < 1 {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be 1 or greater")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be 0 kg or greater")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// A single logged set. Immutable value without identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub reps: Reps,
    pub weight: Weight,
}

/// Identifier of an exercise, assigned once at creation.
///
/// Generated ids are UUID strings, but any non-empty id read from stored
/// or imported data is preserved as is.
#[derive(AsRef, Debug, Default, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(String);

impl ExerciseID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()).to_string())
    }
}

#[derive(AsRef, Debug, Default, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseSessionID(String);

impl ExerciseSessionID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<String> for ExerciseSessionID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExerciseSessionID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u128> for ExerciseSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()).to_string())
    }
}

/// All sets logged for one exercise on one local calendar day.
///
/// At most one exercise session exists per exercise and day. Sessions
/// emptied by a set deletion are pruned from their exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSession {
    pub id: ExerciseSessionID,
    pub date: DateTime<Utc>,
    pub sets: Vec<Set>,
    pub note: Option<String>,
}

impl ExerciseSession {
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub category: Category,
    pub sessions: Vec<ExerciseSession>,
}

impl Exercise {
    pub fn new(name: &str, category: &str) -> Result<Self, ExerciseError> {
        Ok(Self {
            id: ExerciseID::new(),
            name: Name::new(name)?,
            category: Category::new(category)?,
            sessions: vec![],
        })
    }

    /// Maximum weight across all sets in all sessions, zero if none.
    #[must_use]
    pub fn max_weight(&self) -> Weight {
        self.sessions
            .iter()
            .flat_map(|s| &s.sets)
            .map(|s| s.weight)
            .fold(Weight::default(), |max, w| if w > max { w } else { max })
    }

    #[must_use]
    pub fn last_session(&self) -> Option<&ExerciseSession> {
        self.sessions.iter().max_by_key(|s| s.date)
    }

    /// Most recent session not dated today.
    #[must_use]
    pub fn previous_session(&self) -> Option<&ExerciseSession> {
        let today = Local::now().date_naive();
        self.sessions
            .iter()
            .filter(|s| s.day() != today)
            .max_by_key(|s| s.date)
    }

    /// Up to `n` most recent sessions not dated today, most recent first.
    #[must_use]
    pub fn previous_sessions(&self, n: usize) -> Vec<&ExerciseSession> {
        let today = Local::now().date_naive();
        let mut sessions = self
            .sessions
            .iter()
            .filter(|s| s.day() != today)
            .collect::<Vec<_>>();
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        sessions.truncate(n);
        sessions
    }

    #[must_use]
    pub fn session_on(&self, day: NaiveDate) -> Option<&ExerciseSession> {
        self.sessions.iter().find(|s| s.day() == day)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseError {
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error(transparent)]
    InvalidCategory(#[from] CategoryError),
}
