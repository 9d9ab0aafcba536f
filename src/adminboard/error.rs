use thiserror::Error;

/// A single failed validation rule. Only the first failing rule of a draft
/// is ever reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is a required field")]
    Required { field: &'static str },

    #[error("{field} must be a valid {expected}")]
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Record not found: {0}")]
    RecordNotFound(u64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<confique::Error> for AdminError {
    fn from(err: confique::Error) -> Self {
        AdminError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_human_readable() {
        assert_eq!(
            ValidationError::Required { field: "Name" }.to_string(),
            "Name is a required field"
        );
        assert_eq!(
            ValidationError::InvalidFormat {
                field: "Email",
                expected: "email address"
            }
            .to_string(),
            "Email must be a valid email address"
        );
    }

    #[test]
    fn validation_error_passes_through_admin_error() {
        let err: AdminError = ValidationError::UnknownField("colour".into()).into();
        assert_eq!(err.to_string(), "Unknown field: colour");
    }
}
