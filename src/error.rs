use thiserror::Error;

/// Boxed driver or backend error carried by [`MaintenanceError::Operation`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum MaintenanceError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("connection failed: {0}")]
    Connection(#[source] mongodb::error::Error),

    #[error("{operation} on `{collection}` failed: {source}")]
    Operation {
        operation: &'static str,
        collection: String,
        #[source]
        source: BoxError,
    },

    #[error("could not encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("`{collection}` still holds {remaining} documents after clearing")]
    NotCleared { collection: String, remaining: u64 },
}

impl MaintenanceError {
    pub fn operation(
        operation: &'static str,
        collection: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        MaintenanceError::Operation {
            operation,
            collection: collection.into(),
            source: source.into(),
        }
    }
}

pub type Result<T, E = MaintenanceError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_error_names_collection() {
        let err = MaintenanceError::operation(
            "delete_many",
            "categories",
            std::io::Error::new(std::io::ErrorKind::Other, "socket closed"),
        );
        assert_eq!(
            err.to_string(),
            "delete_many on `categories` failed: socket closed"
        );
    }

    #[test]
    fn test_not_cleared_message() {
        let err = MaintenanceError::NotCleared {
            collection: "categories".into(),
            remaining: 2,
        };
        assert_eq!(
            err.to_string(),
            "`categories` still holds 2 documents after clearing"
        );
    }
}
