//! Serializable counterparts of the domain model.
//!
//! The JSON field names are the persisted and exported wire format and must
//! not change. Ids are opaque strings and taken over verbatim. There is no
//! versioning field, stored data is converted directly into the domain
//! model and invalid values are rejected as a whole.

use chrono::{DateTime, Utc};

use gymlog_domain as domain;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutData {
    pub exercises: Vec<Exercise>,
    #[serde(rename = "workoutSessions", default)]
    pub workout_sessions: Vec<WorkoutSession>,
}

impl From<&domain::WorkoutData> for WorkoutData {
    fn from(value: &domain::WorkoutData) -> Self {
        Self {
            exercises: value.exercises.iter().map(Exercise::from).collect(),
            workout_sessions: value
                .workout_sessions
                .iter()
                .map(WorkoutSession::from)
                .collect(),
        }
    }
}

impl TryFrom<WorkoutData> for domain::WorkoutData {
    type Error = DataError;

    fn try_from(value: WorkoutData) -> Result<Self, Self::Error> {
        Ok(Self {
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            workout_sessions: value
                .workout_sessions
                .into_iter()
                .map(domain::WorkoutSession::from)
                .collect(),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub sessions: Vec<ExerciseSession>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            category: value.category.to_string(),
            sessions: value.sessions.iter().map(ExerciseSession::from).collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DataError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            category: domain::Category::new(&value.category)?,
            sessions: value
                .sessions
                .into_iter()
                .map(domain::ExerciseSession::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseSession {
    pub id: String,
    pub date: DateTime<Utc>,
    pub sets: Vec<Set>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&domain::ExerciseSession> for ExerciseSession {
    fn from(value: &domain::ExerciseSession) -> Self {
        Self {
            id: value.id.to_string(),
            date: value.date,
            sets: value.sets.iter().map(Set::from).collect(),
            note: value.note.clone(),
        }
    }
}

impl TryFrom<ExerciseSession> for domain::ExerciseSession {
    type Error = DataError;

    fn try_from(value: ExerciseSession) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            date: value.date,
            sets: value
                .sets
                .into_iter()
                .map(domain::Set::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            note: value.note,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub reps: u32,
    pub weight: f32,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        Self {
            reps: value.reps.into(),
            weight: value.weight.into(),
        }
    }
}

impl TryFrom<Set> for domain::Set {
    type Error = DataError;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        Ok(Self {
            reps: domain::Reps::new(value.reps)?,
            weight: domain::Weight::new(value.weight)?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: String,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "exerciseIds", default)]
    pub exercise_ids: Vec<String>,
    #[serde(
        rename = "isDwarfWorkout",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_dwarf_workout: Option<bool>,
}

impl From<&domain::WorkoutSession> for WorkoutSession {
    fn from(value: &domain::WorkoutSession) -> Self {
        Self {
            id: value.id.to_string(),
            start_time: value.start_time,
            end_time: value.end_time,
            exercise_ids: value.exercise_ids.iter().map(ToString::to_string).collect(),
            is_dwarf_workout: value.is_dwarf_workout.then_some(true),
        }
    }
}

impl From<WorkoutSession> for domain::WorkoutSession {
    fn from(value: WorkoutSession) -> Self {
        Self {
            id: value.id.into(),
            start_time: value.start_time,
            end_time: value.end_time,
            exercise_ids: value.exercise_ids.into_iter().map(Into::into).collect(),
            is_dwarf_workout: value.is_dwarf_workout.unwrap_or(false),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DataError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidCategory(#[from] domain::CategoryError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
}
