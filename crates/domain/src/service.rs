use chrono::{DateTime, NaiveDate, Utc};
use log::{error, warn};

use crate::{
    Category, DataRepository, ExerciseID, ExerciseSessionID, Name, Set, WorkoutData,
    WorkoutSessionID,
};

/// Owner of the current workout data snapshot.
///
/// Every mutation entry point computes the next snapshot from the current
/// one, replaces the owned value and persists it through the repository.
/// Persistence failures are logged and never surfaced to the caller, a
/// failed read degrades to the default data set.
pub struct Service<R> {
    repository: R,
    data: WorkoutData,
}

impl<R: DataRepository> Service<R> {
    pub fn new(repository: R) -> Self {
        let data = match repository.read_data() {
            Ok(data) => data,
            Err(err) => {
                error!("failed to read workout data: {err}");
                WorkoutData::default()
            }
        };
        Self { repository, data }
    }

    #[must_use]
    pub fn data(&self) -> &WorkoutData {
        &self.data
    }

    /// Replaces the entire snapshot, e.g. after an import.
    pub fn replace_data(&mut self, data: WorkoutData) {
        self.apply(data);
    }

    pub fn add_exercise(&mut self, name: Name, category: Category) {
        let data = self.data.add_exercise(name, category);
        self.apply(data);
    }

    pub fn delete_exercise(&mut self, id: ExerciseID) {
        let data = self.data.delete_exercise(id);
        self.apply(data);
    }

    pub fn add_set(&mut self, exercise_id: ExerciseID, set: Set, date: Option<DateTime<Utc>>) {
        let data = self.data.add_set(exercise_id, set, date);
        self.apply(data);
    }

    pub fn delete_set(
        &mut self,
        exercise_id: ExerciseID,
        session_id: ExerciseSessionID,
        index: usize,
    ) {
        let data = self.data.delete_set(exercise_id, session_id, index);
        self.apply(data);
    }

    pub fn update_set(
        &mut self,
        exercise_id: ExerciseID,
        session_id: ExerciseSessionID,
        index: usize,
        set: Set,
    ) {
        let data = self.data.update_set(exercise_id, session_id, index, set);
        self.apply(data);
    }

    pub fn update_session_note(&mut self, exercise_id: ExerciseID, day: NaiveDate, note: &str) {
        let data = self.data.update_session_note(exercise_id, day, note);
        self.apply(data);
    }

    pub fn start_workout_session(&mut self, dwarf: bool) {
        let data = self.data.start_workout_session(dwarf);
        self.apply(data);
    }

    pub fn end_workout_session(&mut self, id: WorkoutSessionID) {
        let data = self.data.end_workout_session(id);
        self.apply(data);
    }

    pub fn delete_workout_session(&mut self, id: WorkoutSessionID) {
        let data = self.data.delete_workout_session(id);
        self.apply(data);
    }

    pub fn add_exercise_to_workout_session(
        &mut self,
        session_id: WorkoutSessionID,
        exercise_id: ExerciseID,
    ) {
        let data = self
            .data
            .add_exercise_to_workout_session(session_id, exercise_id);
        self.apply(data);
    }

    pub fn remove_sessions_from_date(&mut self, day: NaiveDate) {
        let data = self.data.remove_sessions_from_date(day);
        self.apply(data);
    }

    pub fn clean_orphaned_sessions(&mut self) {
        let data = self.data.clean_orphaned_sessions();
        self.apply(data);
    }

    fn apply(&mut self, data: WorkoutData) {
        self.data = data;
        if let Err(err) = self.repository.write_data(&self.data) {
            warn!("failed to persist workout data: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use crate::StorageError;

    use super::*;

    struct FakeRepository {
        data: Rc<RefCell<WorkoutData>>,
        fail_writes: bool,
    }

    impl DataRepository for FakeRepository {
        fn read_data(&self) -> Result<WorkoutData, StorageError> {
            Ok(self.data.borrow().clone())
        }

        fn write_data(&self, data: &WorkoutData) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Other("write failed".into()));
            }
            *self.data.borrow_mut() = data.clone();
            Ok(())
        }
    }

    struct FailingRepository;

    impl DataRepository for FailingRepository {
        fn read_data(&self) -> Result<WorkoutData, StorageError> {
            Err(StorageError::NotFound)
        }

        fn write_data(&self, _: &WorkoutData) -> Result<(), StorageError> {
            Err(StorageError::NotFound)
        }
    }

    #[test]
    fn test_service_loads_data_on_creation() {
        let stored = Rc::new(RefCell::new(
            WorkoutData::default().add_exercise(
                Name::new("Bench Press").unwrap(),
                Category::new("Push").unwrap(),
            ),
        ));
        let service = Service::new(FakeRepository {
            data: Rc::clone(&stored),
            fail_writes: false,
        });
        assert_eq!(*service.data(), *stored.borrow());
    }

    #[test]
    fn test_service_persists_after_mutation() {
        let stored = Rc::new(RefCell::new(WorkoutData::default()));
        let mut service = Service::new(FakeRepository {
            data: Rc::clone(&stored),
            fail_writes: false,
        });
        service.add_exercise(
            Name::new("Bench Press").unwrap(),
            Category::new("Push").unwrap(),
        );
        assert_eq!(stored.borrow().exercises.len(), 1);
        assert_eq!(*service.data(), *stored.borrow());
    }

    #[test]
    fn test_service_drops_failed_writes_silently() {
        let stored = Rc::new(RefCell::new(WorkoutData::default()));
        let mut service = Service::new(FakeRepository {
            data: Rc::clone(&stored),
            fail_writes: true,
        });
        service.start_workout_session(false);
        assert_eq!(service.data().workout_sessions.len(), 1);
        assert_eq!(stored.borrow().workout_sessions.len(), 0);
    }

    #[test]
    fn test_service_degrades_to_default_data_on_read_failure() {
        let service = Service::new(FailingRepository);
        assert_eq!(*service.data(), WorkoutData::default());
    }
}
