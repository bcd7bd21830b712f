//! Validated text labels of the data model.

use derive_more::{AsRef, Display};

const MAX_NAME_LENGTH: usize = 64;

/// Exercise name, trimmed, non-empty and at most 64 characters.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let name = non_empty(name).ok_or(NameError::Empty)?;
        let length = name.chars().count();

        if length > MAX_NAME_LENGTH {
            return Err(NameError::TooLong(length));
        }

        Ok(Name(name))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

/// Free-text grouping label for exercises, e.g. "Push" or "Legs".
///
/// There is no separate category entity. The set of existing categories is
/// the set of distinct values currently in use by exercises.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Category(String);

impl Category {
    pub fn new(category: &str) -> Result<Self, CategoryError> {
        Ok(Category(non_empty(category).ok_or(CategoryError::Empty)?))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CategoryError {
    #[error("Category must not be empty")]
    Empty,
}

fn non_empty(label: &str) -> Option<String> {
    let trimmed = label.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
