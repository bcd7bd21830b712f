#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("key not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_from_boxed_error() {
        assert!(matches!(
            StorageError::from(Box::<dyn std::error::Error>::from("foo")),
            StorageError::Other(error) if error.to_string() == "foo"
        ));
    }
}
