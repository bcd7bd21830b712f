//! JSON import and export of the entire data set.
//!
//! Import performs the same shallow shape validation as previous releases:
//! the payload must be a JSON object whose `exercises` field is an array.
//! Anything else is rejected without partial application.

use serde_json::Value;

use gymlog_domain as domain;

use crate::model;

pub fn export_data(data: &domain::WorkoutData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&model::WorkoutData::from(data))
}

pub fn import_data(text: &str) -> Result<domain::WorkoutData, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ImportError::Malformed(err.to_string()))?;
    if !value.get("exercises").is_some_and(Value::is_array) {
        return Err(ImportError::MissingExercises);
    }
    let data: model::WorkoutData =
        serde_json::from_value(value).map_err(|err| ImportError::Malformed(err.to_string()))?;
    Ok(domain::WorkoutData::try_from(data)?)
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImportError {
    #[error("malformed workout data: {0}")]
    Malformed(String),
    #[error("missing exercise list")]
    MissingExercises,
    #[error(transparent)]
    Invalid(#[from] model::DataError),
}
