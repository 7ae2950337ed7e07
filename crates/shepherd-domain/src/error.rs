//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the contextual variants
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for Shepherd collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Instance identity registration or lookup error
    #[error("Identity error: {message}")]
    Identity {
        /// Description of the identity error
        message: String,
    },

    /// Cloud credential error
    #[error("Credential error: {message}")]
    Credential {
        /// Description of the credential error
        message: String,
    },

    /// Backup repository error
    #[error("Backup error: {message}")]
    Backup {
        /// Description of the backup error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Job scheduling error
    #[error("Scheduler error: {message}")]
    Scheduler {
        /// Description of the scheduler error
        message: String,
    },

    /// Peer discovery error
    #[error("Discovery error: {message}")]
    Discovery {
        /// Description of the discovery error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Collaborator error creation methods
impl Error {
    /// Create an identity error
    pub fn identity<S: Into<String>>(message: S) -> Self {
        Self::Identity {
            message: message.into(),
        }
    }

    /// Create a credential error
    pub fn credential<S: Into<String>>(message: S) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    /// Create a backup error
    pub fn backup<S: Into<String>>(message: S) -> Self {
        Self::Backup {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backup error with source
    pub fn backup_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Backup {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a scheduler error
    pub fn scheduler<S: Into<String>>(message: S) -> Self {
        Self::Scheduler {
            message: message.into(),
        }
    }

    /// Create a discovery error
    pub fn discovery<S: Into<String>>(message: S) -> Self {
        Self::Discovery {
            message: message.into(),
            source: None,
        }
    }

    /// Create a discovery error with source
    pub fn discovery_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Discovery {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Network error creation methods
impl Error {
    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
