use thiserror::Error;

use crate::policy::PolicyNodeType;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Node '{id}' with type '{kind}' not found")]
    NodeNotFound { id: String, kind: PolicyNodeType },

    #[error("Parent of '{id}' with type '{kind}' not found")]
    ParentNotFound { id: String, kind: PolicyNodeType },

    #[error("Child of '{id}' with type '{kind}' not found")]
    ChildNotFound { id: String, kind: PolicyNodeType },

    #[error("Role '{role}' does not record a declaring resource")]
    MissingArtefact { role: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl PolicyError {
    /// True for lookups that found no structural match in the graph
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PolicyError::NodeNotFound { .. }
                | PolicyError::ParentNotFound { .. }
                | PolicyError::ChildNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PolicyError>;
