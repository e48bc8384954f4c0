use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Error creating identity client: {message}")]
    ClientCreation { message: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Unable to query projects: {message}")]
    Query { message: String },

    #[error("Unable to retrieve projects: {message}")]
    Retrieve { message: String },

    #[error("Your query returned no results. Please change your search criteria and try again.")]
    NoResults,

    #[error("Your query returned more than one result")]
    MultipleResults { count: usize },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid data source configuration: {message}")]
    InvalidModel { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    Remote,
    UserInput,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LookupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LookupError::Config { .. }
            | LookupError::ConfigValidation { .. }
            | LookupError::InvalidConfigValue { .. }
            | LookupError::MissingConfig { .. } => ErrorCategory::Configuration,
            LookupError::ClientCreation { .. } | LookupError::Auth { .. } => {
                ErrorCategory::Authentication
            }
            LookupError::Query { .. } | LookupError::Retrieve { .. } | LookupError::Api(_) => {
                ErrorCategory::Remote
            }
            LookupError::NoResults
            | LookupError::MultipleResults { .. }
            | LookupError::InvalidModel { .. } => ErrorCategory::UserInput,
            LookupError::Serialization(_) | LookupError::Io(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者可以自行修正的錯誤
            ErrorCategory::UserInput | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Authentication | ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// 查詢條件造成的錯誤 (零筆或多筆結果)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LookupError::NoResults | LookupError::MultipleResults { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LookupError::NoResults => {
                "Check domain_id, name and parent_id; the filter matched no project"
            }
            LookupError::MultipleResults { .. } => {
                "Add name, domain_id or parent_id so that the filter matches a single project"
            }
            LookupError::ClientCreation { .. } | LookupError::Auth { .. } => {
                "Verify auth_url, region and credentials (user_name/password or token)"
            }
            LookupError::Query { .. } | LookupError::Api(_) => {
                "Check network connectivity and that the identity service is reachable"
            }
            LookupError::Retrieve { .. } => {
                "The identity service returned an unexpected payload; check the endpoint version (v3)"
            }
            LookupError::Config { .. }
            | LookupError::ConfigValidation { .. }
            | LookupError::InvalidConfigValue { .. }
            | LookupError::MissingConfig { .. } => {
                "Fix the provider configuration file or OS_* environment variables"
            }
            LookupError::InvalidModel { .. } => {
                "Only region, domain_id, name and parent_id can be set on the data source"
            }
            LookupError::Serialization(_) | LookupError::Io(_) => {
                "Re-run with --verbose and report the error"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::MultipleResults { count } => {
                format!("Your query returned more than one result ({} projects matched)", count)
            }
            LookupError::Api(e) if e.is_timeout() => {
                "The identity service did not answer in time".to_string()
            }
            LookupError::Api(e) if e.is_connect() => {
                "Could not connect to the identity service".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
