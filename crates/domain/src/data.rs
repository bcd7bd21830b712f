use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::{
    Category, Exercise, ExerciseID, ExerciseSession, ExerciseSessionID, Name, Set, StorageError,
    WorkoutSession, WorkoutSessionID,
};

pub trait DataRepository {
    fn read_data(&self) -> Result<WorkoutData, StorageError>;
    fn write_data(&self, data: &WorkoutData) -> Result<(), StorageError>;
}

/// The aggregate root holding all exercises and workout sessions.
///
/// Mutation operations never modify the snapshot in place. Each takes the
/// current value and returns the next one. Operations whose ids or indices
/// do not resolve return the snapshot unchanged. References between workout
/// sessions and exercises are non-owning, so deleting an exercise leaves
/// dangling ids behind which read-side derivations filter out.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutData {
    pub exercises: Vec<Exercise>,
    pub workout_sessions: Vec<WorkoutSession>,
}

impl WorkoutData {
    #[must_use]
    pub fn exercise(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn workout_session(&self, id: WorkoutSessionID) -> Option<&WorkoutSession> {
        self.workout_sessions.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn active_workout_session(&self) -> Option<&WorkoutSession> {
        self.workout_sessions.iter().find(|s| s.is_active())
    }

    #[must_use]
    pub fn add_exercise(&self, name: Name, category: Category) -> Self {
        let mut data = self.clone();
        data.exercises.push(Exercise {
            id: ExerciseID::new(),
            name,
            category,
            sessions: vec![],
        });
        data
    }

    /// Removes the exercise. References in `exercise_ids` of workout
    /// sessions are left untouched and become dangling.
    #[must_use]
    pub fn delete_exercise(&self, id: ExerciseID) -> Self {
        let mut data = self.clone();
        data.exercises.retain(|e| e.id != id);
        data
    }

    /// Appends the set to the exercise session of the given date (today if
    /// none is given), creating the session if necessary. Two calls on the
    /// same calendar day end up in the same session.
    #[must_use]
    pub fn add_set(&self, exercise_id: ExerciseID, set: Set, date: Option<DateTime<Utc>>) -> Self {
        let time = date.unwrap_or_else(Utc::now);
        let day = time.with_timezone(&Local).date_naive();
        let mut data = self.clone();
        if let Some(exercise) = data.exercises.iter_mut().find(|e| e.id == exercise_id) {
            if let Some(session) = exercise.sessions.iter_mut().find(|s| s.day() == day) {
                session.sets.push(set);
            } else {
                exercise.sessions.push(ExerciseSession {
                    id: ExerciseSessionID::new(),
                    date: time,
                    sets: vec![set],
                    note: None,
                });
            }
        }
        data
    }

    /// Removes the set at `index`. A session emptied by the removal is
    /// pruned from the exercise.
    #[must_use]
    pub fn delete_set(
        &self,
        exercise_id: ExerciseID,
        session_id: ExerciseSessionID,
        index: usize,
    ) -> Self {
        let mut data = self.clone();
        if let Some(exercise) = data.exercises.iter_mut().find(|e| e.id == exercise_id) {
            if let Some(session) = exercise.sessions.iter_mut().find(|s| s.id == session_id) {
                if index < session.sets.len() {
                    session.sets.remove(index);
                }
                if session.sets.is_empty() {
                    exercise.sessions.retain(|s| s.id != session_id);
                }
            }
        }
        data
    }

    #[must_use]
    pub fn update_set(
        &self,
        exercise_id: ExerciseID,
        session_id: ExerciseSessionID,
        index: usize,
        set: Set,
    ) -> Self {
        let mut data = self.clone();
        if let Some(exercise) = data.exercises.iter_mut().find(|e| e.id == exercise_id) {
            if let Some(session) = exercise.sessions.iter_mut().find(|s| s.id == session_id) {
                if let Some(slot) = session.sets.get_mut(index) {
                    *slot = set;
                }
            }
        }
        data
    }

    #[must_use]
    pub fn update_session_note(&self, exercise_id: ExerciseID, day: NaiveDate, note: &str) -> Self {
        let mut data = self.clone();
        if let Some(exercise) = data.exercises.iter_mut().find(|e| e.id == exercise_id) {
            if let Some(session) = exercise.sessions.iter_mut().find(|s| s.day() == day) {
                session.note = Some(note.to_string());
            }
        }
        data
    }

    /// Starts a new workout session. The caller must ensure that no other
    /// session is active.
    #[must_use]
    pub fn start_workout_session(&self, dwarf: bool) -> Self {
        let mut data = self.clone();
        data.workout_sessions.push(WorkoutSession::start(dwarf));
        data
    }

    /// Completes the active session with the given id. Completion is
    /// terminal, ending an already completed session changes nothing.
    #[must_use]
    pub fn end_workout_session(&self, id: WorkoutSessionID) -> Self {
        let mut data = self.clone();
        if let Some(session) = data
            .workout_sessions
            .iter_mut()
            .find(|s| s.id == id && s.is_active())
        {
            session.end_time = Some(Utc::now());
        }
        data
    }

    /// Removes the workout session and the exercise sessions it produced.
    ///
    /// Only exercises listed in the session's `exercise_ids` lose their
    /// exercise session dated on the workout's start day. Exercise sessions
    /// of the same day that belong to other exercises are kept.
    #[must_use]
    pub fn delete_workout_session(&self, id: WorkoutSessionID) -> Self {
        let mut data = self.clone();
        let Some(session) = data.workout_sessions.iter().find(|s| s.id == id) else {
            return data;
        };
        let day = session.day();
        let exercise_ids = session.exercise_ids.clone();
        for exercise in data
            .exercises
            .iter_mut()
            .filter(|e| exercise_ids.contains(&e.id))
        {
            exercise.sessions.retain(|s| s.day() != day);
        }
        data.workout_sessions.retain(|s| s.id != id);
        data
    }

    #[must_use]
    pub fn add_exercise_to_workout_session(
        &self,
        session_id: WorkoutSessionID,
        exercise_id: ExerciseID,
    ) -> Self {
        let mut data = self.clone();
        if let Some(session) = data.workout_sessions.iter_mut().find(|s| s.id == session_id) {
            if !session.exercise_ids.contains(&exercise_id) {
                session.exercise_ids.push(exercise_id);
            }
        }
        data
    }

    /// Strips all exercise sessions dated on the given day from every
    /// exercise, regardless of workout session membership. Intended for
    /// orphan cleanup, not for normal user actions.
    #[must_use]
    pub fn remove_sessions_from_date(&self, day: NaiveDate) -> Self {
        let mut data = self.clone();
        for exercise in &mut data.exercises {
            exercise.sessions.retain(|s| s.day() != day);
        }
        data
    }

    /// Strips exercise sessions whose day has no completed workout session.
    ///
    /// Data without any workout sessions at all is left untouched, as such
    /// data predates workout session tracking.
    #[must_use]
    pub fn clean_orphaned_sessions(&self) -> Self {
        if self.workout_sessions.is_empty() {
            return self.clone();
        }
        let completed_days = self
            .workout_sessions
            .iter()
            .filter(|s| !s.is_active())
            .map(WorkoutSession::day)
            .collect::<BTreeSet<_>>();
        let mut data = self.clone();
        for exercise in &mut data.exercises {
            exercise.sessions.retain(|s| completed_days.contains(&s.day()));
        }
        data
    }
}
