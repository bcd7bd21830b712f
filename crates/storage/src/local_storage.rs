use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use log::warn;

use gymlog_domain as domain;
use gymlog_web_app::log as weblog;

use crate::model;

const KEY_WORKOUT_DATA: &str = "workout data";

pub struct Data;

impl Data {
    /// Replaces unreadable or missing stored data with the default data set
    /// and persists it immediately.
    fn bootstrap(&self) -> domain::WorkoutData {
        let data = domain::WorkoutData::default();
        if let Err(err) = domain::DataRepository::write_data(self, &data) {
            warn!("failed to persist default workout data: {err}");
        }
        data
    }
}

impl domain::DataRepository for Data {
    fn read_data(&self) -> Result<domain::WorkoutData, domain::StorageError> {
        match gloo_storage::LocalStorage::get::<model::WorkoutData>(KEY_WORKOUT_DATA) {
            Ok(stored) => match domain::WorkoutData::try_from(stored) {
                Ok(data) => Ok(data),
                Err(err) => {
                    warn!("discarding invalid stored workout data: {err}");
                    Ok(self.bootstrap())
                }
            },
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(self.bootstrap()),
            Err(err) => {
                warn!("failed to read stored workout data: {err}");
                Ok(self.bootstrap())
            }
        }
    }

    fn write_data(&self, data: &domain::WorkoutData) -> Result<(), domain::StorageError> {
        gloo_storage::LocalStorage::set(KEY_WORKOUT_DATA, model::WorkoutData::from(data))
            .map_err(|err| domain::StorageError::Other(err.to_string().into()))
    }
}

pub struct Log;

const KEY_LOG: &str = "log";

impl weblog::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<weblog::Entry>, weblog::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| weblog::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: weblog::Entry) -> Result<(), weblog::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(weblog::MAX_ENTRIES);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| weblog::Error::Unknown(err.to_string()))
    }
}
