use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Persistence: {0}")]
    Persistence(String),
}

impl DomainError {
    /// Short message suitable for showing to an operator.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::NotFound { entity, value, .. } => {
                format!("{} {} does not exist.", entity, value)
            }
            DomainError::Validation(msg) => msg.clone(),
            DomainError::Persistence(_) => {
                "The billing database could not complete the operation.".to_string()
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, DomainError::Persistence(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = DomainError::Validation("Name cannot be empty.".into());
        assert_eq!(err.user_message(), "Name cannot be empty.");
        assert!(err.is_validation());
        assert!(!err.is_persistence());
    }

    #[test]
    fn persistence_message_hides_driver_details() {
        let err = DomainError::Persistence("database is locked".into());
        assert!(!err.user_message().contains("locked"));
        assert_eq!(err.to_string(), "Persistence: database is locked");
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = DomainError::NotFound {
            entity: "Customer",
            field: "id",
            value: "42".into(),
        };
        assert_eq!(err.user_message(), "Customer 42 does not exist.");
        assert_eq!(err.to_string(), "Not found: Customer with id=42");
    }
}
