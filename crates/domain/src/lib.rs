#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod data;
mod error;
mod exercise;
mod label;
mod service;
mod statistics;
mod workout_session;

pub use data::{DataRepository, WorkoutData};
pub use error::StorageError;
pub use exercise::{
    Exercise, ExerciseError, ExerciseID, ExerciseSession, ExerciseSessionID, Reps, RepsError, Set,
    Weight, WeightError,
};
pub use label::{Category, CategoryError, Name, NameError};
pub use service::Service;
pub use statistics::{
    categories, current_streak, last_workout_date, muscle_group_order, total_time_minutes,
    total_workouts, workout_dates, workouts_this_week,
};
pub use workout_session::{WorkoutSession, WorkoutSessionID};
